use crate::{
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Drive a parameter on `source` from a control signal.
///
/// The control signal is rendered once per block and averaged, then applied
/// as `base + avg * depth`. Block-rate modulation is plenty for the
/// pitch sweep that builds the membrane preset (a fast envelope pushing the
/// oscillator frequency down onto its fundamental).
pub struct Modulate<S, C>
where
    S: GraphNode + Modulatable,
    C: GraphNode,
{
    source: S,
    control: C,
    param: S::Param,
    depth: f32,
    control_buffer: Vec<f32>,
}

impl<S, C> Modulate<S, C>
where
    S: GraphNode + Modulatable,
    C: GraphNode,
{
    pub fn new(source: S, control: C, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            control,
            param,
            depth,
            control_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

fn block_average(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    buffer.iter().sum::<f32>() / buffer.len() as f32
}

impl<S, C> GraphNode for Modulate<S, C>
where
    S: GraphNode + Modulatable,
    C: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let frames = &mut self.control_buffer[..out.len()];
        frames.fill(0.0);
        self.control.render_block(frames, ctx);

        let base = self.source.get_param(self.param);
        let modulation = block_average(frames) * self.depth;
        self.source.apply_modulation(self.param, base, modulation);

        self.source.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.control.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.control.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        envelope::EnvNode,
        extensions::NodeExt,
        oscillator::{OscNode, OscParam},
    };

    #[test]
    fn sweep_produces_finite_output() {
        let sweep = EnvNode::adsr(0.001, 0.05, 0.0, 0.05);
        let mut node = OscNode::sine()
            .with_frequency(55.0)
            .modulate(sweep, OscParam::Frequency, 400.0);

        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        node.note_on(&ctx);

        let mut buffer = vec![0.0f32; 1024];
        node.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|s| s.is_finite()));
        assert!(buffer.iter().any(|&s| s.abs() > 1e-3));
    }

    #[test]
    fn extreme_depth_is_clamped_by_the_target() {
        let sweep = EnvNode::adsr(0.001, 0.05, 0.0, 0.05);
        let mut node = OscNode::sine()
            .with_frequency(55.0)
            .modulate(sweep, OscParam::Frequency, 1e9);

        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        node.note_on(&ctx);

        let mut buffer = vec![0.0f32; 512];
        node.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
