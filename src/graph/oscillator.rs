use std::f32::consts::TAU;

use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/// Oscillator node: the sound source at the bottom of every preset.
///
/// By default the pitch tracks `ctx.frequency` (keyboard use). Percussive
/// presets call `with_frequency` to pin the pitch instead, so the drum
/// stays on its own fundamental no matter which key triggered it; that
/// pinned frequency is what the pitch-sweep modulation grabs onto.
pub struct OscNode {
    osc: OscillatorBlock,
    /// If set, ignore `ctx.frequency` and render at this pitch.
    base_frequency: Option<f32>,
    /// Pitch after modulation (only meaningful when `base_frequency` is set).
    current_frequency: f32,
}

/// Parameters that can be modulated on an oscillator.
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz.
    Frequency,
}

impl OscNode {
    fn new(waveform: Waveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            base_frequency: None,
            current_frequency: 440.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    /// Pin the pitch, ignoring the note frequency from `RenderCtx`.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self.current_frequency = freq;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let frequency = if self.base_frequency.is_some() {
            self.current_frequency
        } else {
            ctx.frequency
        };

        let modified = RenderCtx {
            frequency,
            ..*ctx
        };
        self.osc.render(out, &modified);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
        // Modulation moves current_frequency during the note; snap back so
        // the next sweep starts from the base.
        if let Some(base) = self.base_frequency {
            self.current_frequency = base;
        }
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency.unwrap_or(440.0),
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                self.current_frequency = (base + modulation).clamp(10.0, 20_000.0);
            }
        }
    }
}

/// Two-operator FM oscillator: a sine carrier phase-modulated by a sine
/// modulator running at `ratio` times the note frequency.
///
/// `index` scales how far the modulator pushes the carrier phase: low
/// values add a little shimmer, high values get clangorous.
pub struct FmOscNode {
    carrier_phase: f32,
    modulator_phase: f32,
    ratio: f32,
    index: f32,
}

impl FmOscNode {
    pub fn new(ratio: f32, index: f32) -> Self {
        Self {
            carrier_phase: 0.0,
            modulator_phase: 0.0,
            ratio,
            index,
        }
    }
}

impl GraphNode for FmOscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let carrier_inc = ctx.frequency / ctx.sample_rate;
        let modulator_inc = carrier_inc * self.ratio;

        for sample in out.iter_mut() {
            let modulation = (TAU * self.modulator_phase).sin();
            *sample = (TAU * self.carrier_phase + self.index * modulation).sin();

            self.carrier_phase = (self.carrier_phase + carrier_inc).fract();
            self.modulator_phase = (self.modulator_phase + modulator_inc).fract();
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.carrier_phase = 0.0;
        self.modulator_phase = 0.0;
    }
}
