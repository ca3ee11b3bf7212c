use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/// Filter response selected at construction time.
#[derive(Debug, Clone, Copy)]
pub enum FilterType {
    LowPass,
    HighPass,
}

/// Topology-preserving state-variable filter (12 dB/octave).
///
/// The SVF computes low-pass and high-pass responses from the same two
/// integrator states; which one lands in the output buffer is fixed per
/// instance. Cutoff is pre-warped so the digital response matches the
/// analog prototype at the cutoff frequency.
pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            filter_type,
        }
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        // Keep the pre-warp below Nyquist or tan() wraps and the filter
        // goes unstable.
        let cutoff = self.cutoff_hz.min(0.45 * sample_rate);
        let wd = TAU * cutoff;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let g = self.compute_g(ctx.sample_rate);
        let k = 2.0 - 2.0 * self.resonance;
        let h = 1.0 / (1.0 + g * (g + k));

        for sample in out.iter_mut() {
            let v3 = *sample - self.ic2eq;
            let v1 = h * (self.ic1eq + g * v3);
            let v2 = self.ic2eq + g * v1;

            self.ic1eq = 2.0 * v1 - self.ic1eq;
            self.ic2eq = 2.0 * v2 - self.ic2eq;

            *sample = match self.filter_type {
                FilterType::LowPass => v2,
                FilterType::HighPass => *sample - k * v1 - v2,
            };
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        buffer[32..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn sine_block(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 256];
        filter.render(&mut buffer, &RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0));
        assert!(buffer[255] > 0.99);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 256];
        filter.render(&mut buffer, &RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0));
        assert!(buffer[255].abs() < 1e-3);
    }

    #[test]
    fn lowpass_attenuates_above_cutoff() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = sine_block(5_000.0, 512);
        filter.render(&mut buffer, &RenderCtx::from_freq(SAMPLE_RATE, 5_000.0, 1.0));
        assert!(
            peak_after_transient(&buffer) < 0.3,
            "10x cutoff should be well attenuated"
        );
    }

    #[test]
    fn highpass_attenuates_below_cutoff() {
        let mut filter = SVFilter::highpass(5_000.0);
        let mut buffer = sine_block(200.0, 1024);
        filter.render(&mut buffer, &RenderCtx::from_freq(SAMPLE_RATE, 200.0, 1.0));
        assert!(peak_after_transient(&buffer) < 0.3);
    }
}
