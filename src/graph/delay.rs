use crate::dsp::delay::DelayLine;
use crate::graph::node::{GraphNode, RenderCtx};

/// Feedback delay: the echo effect the chord sequence plays through.
///
/// Each input sample is mixed with the signal read `delay_ms` ago; the sum
/// of input and scaled echo is written back into the line, so the echo
/// repeats and decays by `feedback` on every pass. `mix` is the usual
/// wet/dry balance (0 = dry only, 1 = echo only).
pub struct DelayNode {
    line: DelayLine,
    delay_ms: f32,
    feedback: f32,
    mix: f32,
}

impl DelayNode {
    pub fn new(delay_ms: f32, feedback: f32, mix: f32) -> Self {
        Self {
            line: DelayLine::new(),
            delay_ms,
            feedback: feedback.clamp(0.0, 0.95),
            mix: mix.clamp(0.0, 1.0),
        }
    }
}

impl GraphNode for DelayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let delay_samples = ((self.delay_ms / 1000.0) * ctx.sample_rate) as usize;

        for sample in out.iter_mut() {
            let delayed = self.line.read(delay_samples);
            self.line.write_and_advance(*sample + delayed * self.feedback);
            *sample = *sample * (1.0 - self.mix) + delayed * self.mix;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn impulse_echoes_at_the_delay_time() {
        // 50ms at 1kHz = 50 samples
        let mut node = DelayNode::new(50.0, 0.5, 1.0);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

        let mut buffer = vec![0.0f32; 200];
        buffer[0] = 1.0;
        node.render_block(&mut buffer, &ctx);

        // Fully wet: the dry impulse is gone, the first echo lands at 50,
        // the second (scaled by feedback) at 100.
        assert_eq!(buffer[0], 0.0);
        assert!((buffer[50] - 1.0).abs() < 1e-6);
        assert!((buffer[100] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn dry_mix_passes_input_unchanged() {
        let mut node = DelayNode::new(50.0, 0.5, 0.0);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

        let input: Vec<f32> = (0..100).map(|n| (n as f32 * 0.01).sin()).collect();
        let mut buffer = input.clone();
        node.render_block(&mut buffer, &ctx);

        for (a, b) in buffer.iter().zip(&input) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
