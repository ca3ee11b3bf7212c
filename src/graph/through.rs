use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chain: render the source into the buffer, then let the effect
/// process it in place. `osc → filter` and `voices → delay` are both this.
pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.effect.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.effect.note_off(ctx);
    }

    // Either side can still be sounding: a released source may have a
    // delay tail ringing in the effect.
    fn is_active(&self) -> bool {
        self.source.is_active() || self.effect.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

    #[test]
    fn filters_the_source_in_place() {
        let mut plain = OscNode::sawtooth().amplify(EnvNode::adsr(0.001, 0.05, 1.0, 0.1));
        let mut filtered = OscNode::sawtooth()
            .amplify(EnvNode::adsr(0.001, 0.05, 1.0, 0.1))
            .through(FilterNode::lowpass(300.0));

        let ctx = RenderCtx::from_freq(48_000.0, 2_000.0, 1.0);
        plain.note_on(&ctx);
        filtered.note_on(&ctx);

        let mut plain_buf = vec![0.0f32; 512];
        let mut filtered_buf = vec![0.0f32; 512];
        plain.render_block(&mut plain_buf, &ctx);
        filtered.render_block(&mut filtered_buf, &ctx);

        let peak = |b: &[f32]| b.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak(&filtered_buf) < peak(&plain_buf));
    }
}
