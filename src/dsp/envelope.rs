use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Linear ADSR envelope.

    1.0 ┐    ╱╲
        │   ╱  ╲__________
        │  ╱              ╲
    0.0 └─╱────────────────╲──→ time
         A    D    S        R

The gate drives a small state machine: note_on starts Attack from zero
(clean retrigger), note_off starts Release from wherever the level currently
is, including mid-attack. Release interpolates from a snapshot of the level
taken at note_off so it lands exactly on 0.
*/

/// Stage of the envelope state machine.
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeStage,
    level: f32,

    // Release interpolates from a snapshot taken at note_off.
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),

            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Gate high: restart the attack from zero.
    pub fn note_on(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: release from the current level, whatever stage we are in.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeStage::Idle) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeStage::Release;
    }

    fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeStage::Idle => self.level = 0.0,

            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack_time * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let drop = 1.0 - self.sustain_level;
                self.level -= drop / (self.decay_time * ctx.sample_rate);
                if self.level <= self.sustain_level {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => self.level = self.sustain_level,

            EnvelopeStage::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Fill the buffer with envelope levels, advancing one sample per slot.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeStage::Idle)
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn ctx() -> RenderCtx {
        RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0)
    }

    fn advance(env: &mut Envelope, samples: usize) {
        let mut buffer = vec![0.0; samples];
        env.render(&mut buffer, &ctx());
    }

    #[test]
    fn attack_reaches_peak_then_decays() {
        let mut env = Envelope::adsr(0.01, 0.1, 0.7, 0.2);
        env.note_on();
        advance(&mut env, (0.01 * SAMPLE_RATE) as usize + 1);

        assert!(env.level() > 0.99);
        assert!(!matches!(env.stage(), EnvelopeStage::Attack));
    }

    #[test]
    fn sustain_holds_until_gate_drops() {
        let sustain = 0.6;
        let mut env = Envelope::adsr(0.01, 0.05, sustain, 0.2);
        env.note_on();
        advance(&mut env, ((0.01 + 0.05) * SAMPLE_RATE) as usize + 5);

        assert!(matches!(env.stage(), EnvelopeStage::Sustain));
        assert!((env.level() - sustain).abs() < 0.05);

        advance(&mut env, 500);
        assert!((env.level() - sustain).abs() < 0.05, "sustain must hold");
    }

    #[test]
    fn release_lands_on_zero() {
        let release = 0.03;
        let mut env = Envelope::adsr(0.01, 0.05, 0.5, release);
        env.note_on();
        advance(&mut env, (0.02 * SAMPLE_RATE) as usize);

        env.note_off(&ctx());
        advance(&mut env, (release * SAMPLE_RATE) as usize + 2);

        assert!(env.level() <= 1e-3);
        assert!(matches!(env.stage(), EnvelopeStage::Idle));
        assert!(!env.is_active());
    }

    #[test]
    fn release_mid_attack_starts_from_current_level() {
        let mut env = Envelope::adsr(0.1, 0.05, 0.5, 0.05);
        env.note_on();
        advance(&mut env, (0.05 * SAMPLE_RATE) as usize); // halfway up

        let level_at_release = env.level();
        env.note_off(&ctx());
        advance(&mut env, 1);

        assert!(env.level() <= level_at_release);
        assert!(matches!(env.stage(), EnvelopeStage::Release));
    }
}
