//! Transport playback for the built-in chord sequence.
//!
//! Runs inside the engine on the audio callback. Steps fire at successive
//! sixteenth-note boundaries (block granularity); the voices are a small
//! fixed pool assigned round-robin so a chord's pitches sound together,
//! and the whole bus rings through a feedback delay.
//!
//! Stopping halts the clock but leaves the step cursor and the phase
//! accumulator where they are, so restarting resumes mid-sequence rather
//! than from the top.

use crate::graph::{delay::DelayNode, midi_to_freq, GraphNode, RenderCtx};
use crate::sequencing::{demo_sequence, PitchError, SEQ_BPM};
use crate::timbre;
use crate::MAX_BLOCK_SIZE;

use super::VoiceSlot;

const SEQ_VOICES: usize = 3;
// Dotted-eighth-ish echo behind the sixteenth grid.
const DELAY_MS: f32 = 280.0;
const DELAY_FEEDBACK: f32 = 0.35;
const DELAY_MIX: f32 = 0.4;

pub(crate) struct StepSequencer {
    steps: Vec<Vec<u8>>,
    cursor: usize,
    playing: bool,
    samples_per_step: f64,
    /// Samples until the next step fires. Survives stop/start.
    until_next: f64,
    voices: Vec<VoiceSlot>,
    next_voice: usize,
    delay: DelayNode,
    bus: Vec<f32>,
    scratch: Vec<f32>,
}

impl StepSequencer {
    pub(crate) fn new(sample_rate: f32) -> Result<Self, PitchError> {
        Ok(Self {
            steps: demo_sequence()?,
            cursor: 0,
            playing: false,
            // One entry per sixteenth note.
            samples_per_step: sample_rate as f64 * 60.0 / SEQ_BPM / 4.0,
            until_next: 0.0,
            voices: (0..SEQ_VOICES)
                .map(|_| VoiceSlot::new(Box::new(timbre::mono())))
                .collect(),
            next_voice: 0,
            delay: DelayNode::new(DELAY_MS, DELAY_FEEDBACK, DELAY_MIX),
            bus: vec![0.0; MAX_BLOCK_SIZE],
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        })
    }

    /// Start (or resume) the clock. The first due step fires in the very
    /// next rendered block.
    pub(crate) fn start(&mut self) {
        self.playing = true;
    }

    /// Halt the clock. Cursor and phase are kept, not reset.
    pub(crate) fn stop(&mut self) {
        self.playing = false;
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the next entry to fire.
    pub(crate) fn step(&self) -> usize {
        self.cursor
    }

    /// Advance the clock across this block, fire due steps, and add the
    /// sequence bus (voices through the delay) into `out`.
    pub(crate) fn render_add(&mut self, out: &mut [f32], sample_rate: f32) {
        if self.playing {
            let block = out.len() as f64;
            while self.until_next < block {
                self.fire_step(sample_rate);
                self.until_next += self.samples_per_step;
            }
            self.until_next -= block;
        }

        // Voice tails and the delay keep ringing after stop; only the
        // triggering is gated by the clock.
        let bus = &mut self.bus[..out.len()];
        bus.fill(0.0);
        for voice in &mut self.voices {
            voice.render_add(bus, &mut self.scratch, sample_rate);
        }

        let ctx = RenderCtx::from_freq(sample_rate, 440.0, 1.0);
        self.delay.render_block(bus, &ctx);

        for (o, s) in out.iter_mut().zip(bus.iter()) {
            *o += *s;
        }
    }

    fn fire_step(&mut self, sample_rate: f32) {
        let hold = self.samples_per_step as u64;
        let count = self.steps[self.cursor].len();

        for k in 0..count {
            let pitch = self.steps[self.cursor][k];
            let idx = self.next_voice;
            self.next_voice = (idx + 1) % self.voices.len();
            self.voices[idx].trigger(midi_to_freq(pitch as i32), 1.0, hold, sample_rate);
        }

        self.cursor = (self.cursor + 1) % self.steps.len();
    }
}
