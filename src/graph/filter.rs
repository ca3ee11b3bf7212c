use crate::dsp::filter::SVFilter;
use crate::graph::node::{GraphNode, RenderCtx};

/// Filter node wrapping the state-variable filter for in-place block
/// processing. Used by the presets to darken the saw timbre and to thin
/// the noise burst.
pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
    }

    // A filter shapes what flows through it; it has no sound of its own,
    // so activity is whatever the source upstream reports.
    fn is_active(&self) -> bool {
        false
    }
}
