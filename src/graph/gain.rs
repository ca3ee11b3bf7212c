/// Master gain stage with click-free linear ramps.
///
/// Every level change (the startup fade-in, slider moves, the teardown
/// fade) goes through `ramp_to`, which moves the level linearly
/// over the given window instead of jumping. A jump in gain is a step in
/// the output waveform, and a step is an audible click.
///
/// Targets are clamped to [0, 1].
pub struct GainStage {
    level: f32,
    target: f32,
    step: f32,
}

/// Ramp window for the startup fade-in and for slider moves.
pub const GAIN_RAMP_SECS: f32 = 0.1;
/// Shorter window used when tearing the output down.
pub const TEARDOWN_RAMP_SECS: f32 = 0.01;

impl GainStage {
    /// A stage sitting at silence; callers ramp it up from here.
    pub fn silent() -> Self {
        Self {
            level: 0.0,
            target: 0.0,
            step: 0.0,
        }
    }

    /// Begin a linear ramp from the current level to `target` over
    /// `seconds`. Replaces any ramp in flight.
    pub fn ramp_to(&mut self, target: f32, seconds: f32, sample_rate: f32) {
        let target = target.clamp(0.0, 1.0);
        let samples = (seconds * sample_rate).max(1.0);
        self.target = target;
        self.step = (target - self.level) / samples;
    }

    /// Scale the buffer in place, advancing the ramp one step per sample.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.step != 0.0 {
                self.level += self.step;
                let arrived = (self.step > 0.0 && self.level >= self.target)
                    || (self.step < 0.0 && self.level <= self.target);
                if arrived {
                    self.level = self.target;
                    self.step = 0.0;
                }
            }
            *sample *= self.level;
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}
