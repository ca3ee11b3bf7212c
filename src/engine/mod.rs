//! The engine owns everything that sounds: one pre-built instance of every
//! timbre preset, the step sequencer with its delay bus, and the shared
//! gain stage. It runs entirely on the audio callback; control arrives
//! through a message queue drained at the top of each rendered block, and
//! a small snapshot of display state flows back over an SPSC ring.

pub mod message;
pub mod sequencer;

pub use message::{EngineHandle, EngineMessage};

use crossbeam_channel::{bounded, Receiver};
use rtrb::Producer;

use crate::graph::{
    gain::{GainStage, GAIN_RAMP_SECS, TEARDOWN_RAMP_SECS},
    midi_to_freq, GraphNode, RenderCtx,
};
use crate::io::midi::MIDI_KEY_SHIFT;
use crate::sequencing::PitchError;
use crate::timbre::Timbre;
use crate::MAX_BLOCK_SIZE;

use sequencer::StepSequencer;

/// How long a keyboard-triggered note is held before its scheduled release.
pub const KEY_HOLD_SECS: f32 = 1.0;
/// Level the gain stage fades up to from silence when the engine starts.
pub const STARTUP_GAIN: f32 = 0.5;
/// The fixed keyboard layout: ten scale-degree offsets above the octave root.
pub const DEGREES: [i32; 10] = [0, 2, 4, 7, 9, 12, 14, 16, 19, 21];

const CONTROL_QUEUE_CAPACITY: usize = 256;

/// Apply the humanizing detune: a uniform random factor in [0.99, 1.01].
/// Runs on the control thread, never on the audio callback.
pub fn detune_jitter(frequency: f32) -> f32 {
    use rand::Rng;
    frequency * rand::thread_rng().gen_range(0.99..=1.01)
}

/// Frequency for a keyboard trigger: the octave places the root, the
/// degree offsets from it, and the jitter roughs it up. Octave is
/// unbounded in both directions; far-negative values give subsonic but
/// finite frequencies.
pub fn keyboard_freq(octave: i32, degree: i32) -> f32 {
    detune_jitter(midi_to_freq(octave * 12 + degree))
}

/// Frequency for an external-controller trigger: the key shifted down by
/// the fixed amount, with the same jitter.
pub fn midi_key_freq(key: u8) -> f32 {
    detune_jitter(midi_to_freq(key as i32 - MIDI_KEY_SHIFT))
}

/// Per-block display state pushed from the audio callback to the UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineSnapshot {
    pub gain: f32,
    pub sequence_playing: bool,
    pub sequence_step: usize,
}

/// One sounding unit: a preset's node graph plus the note state needed to
/// schedule its release. Used both for the per-timbre keyboard slots and
/// for the sequencer's voice pool.
pub(crate) struct VoiceSlot {
    node: Box<dyn GraphNode>,
    frequency: f32,
    velocity: f32,
    release_in: Option<u64>,
}

impl VoiceSlot {
    pub(crate) fn new(node: Box<dyn GraphNode>) -> Self {
        Self {
            node,
            frequency: 440.0,
            velocity: 1.0,
            release_in: None,
        }
    }

    pub(crate) fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Start the note and schedule its release `hold_samples` from now.
    /// Retriggering replaces any pending release.
    pub(crate) fn trigger(&mut self, frequency: f32, velocity: f32, hold_samples: u64, sample_rate: f32) {
        self.frequency = frequency;
        self.velocity = velocity.clamp(0.0, 1.0);
        let ctx = RenderCtx::from_freq(sample_rate, frequency, self.velocity);
        self.node.note_on(&ctx);
        self.release_in = Some(hold_samples.max(1));
    }

    /// Render this voice and add it into `out`. Scheduled releases land on
    /// block boundaries.
    pub(crate) fn render_add(&mut self, out: &mut [f32], scratch: &mut [f32], sample_rate: f32) {
        let ctx = RenderCtx::from_freq(sample_rate, self.frequency, self.velocity);

        if let Some(remaining) = self.release_in {
            if remaining <= out.len() as u64 {
                self.node.note_off(&ctx);
                self.release_in = None;
            } else {
                self.release_in = Some(remaining - out.len() as u64);
            }
        }

        let scratch = &mut scratch[..out.len()];
        scratch.fill(0.0);
        self.node.render_block(scratch, &ctx);

        let velocity = self.velocity;
        for (o, s) in out.iter_mut().zip(scratch.iter()) {
            *o += *s * velocity;
        }
    }

    pub(crate) fn is_sounding(&self) -> bool {
        self.node.is_active()
    }
}

pub struct Engine {
    rx: Receiver<EngineMessage>,
    slots: Vec<(Timbre, VoiceSlot)>,
    active: Timbre,
    sequencer: StepSequencer,
    gain: GainStage,
    telemetry: Option<Producer<EngineSnapshot>>,
    sample_rate: f32,
    scratch: Vec<f32>,
}

impl Engine {
    /// Build the full signal path: every timbre instance and the sequencer
    /// bus, mixed, through the shared gain stage. The gain starts silent
    /// and fades up so the stream opening never clicks.
    pub fn new(sample_rate: f32) -> Result<(Engine, EngineHandle), PitchError> {
        let (tx, rx) = bounded(CONTROL_QUEUE_CAPACITY);

        let slots = Timbre::ALL
            .iter()
            .map(|&timbre| (timbre, VoiceSlot::new(timbre.build())))
            .collect();

        let mut gain = GainStage::silent();
        gain.ramp_to(STARTUP_GAIN, GAIN_RAMP_SECS, sample_rate);

        let engine = Engine {
            rx,
            slots,
            active: Timbre::Mono,
            sequencer: StepSequencer::new(sample_rate)?,
            gain,
            telemetry: None,
            sample_rate,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        };

        Ok((engine, EngineHandle::new(tx)))
    }

    /// Attach the ring the UI reads display state from.
    pub fn set_telemetry(&mut self, tx: Producer<EngineSnapshot>) {
        self.telemetry = Some(tx);
    }

    pub fn gain_level(&self) -> f32 {
        self.gain.level()
    }

    pub fn active_timbre(&self) -> Timbre {
        self.active
    }

    pub fn sequence_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn sequence_step(&self) -> usize {
        self.sequencer.step()
    }

    /// Whether any slot is still producing sound (sequence voices aside).
    pub fn any_slot_sounding(&self) -> bool {
        self.slots.iter().any(|(_, slot)| slot.is_sounding())
    }

    /// Render one mono block. Called from the audio callback; blocks must
    /// not exceed `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        self.drain_messages();
        out.fill(0.0);

        for (_, slot) in &mut self.slots {
            slot.render_add(out, &mut self.scratch, self.sample_rate);
        }
        self.sequencer.render_add(out, self.sample_rate);

        self.gain.render(out);

        if let Some(tx) = &mut self.telemetry {
            // Dropped when the UI lags behind; the next block replaces it.
            let _ = tx.push(EngineSnapshot {
                gain: self.gain.level(),
                sequence_playing: self.sequencer.is_playing(),
                sequence_step: self.sequencer.step(),
            });
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                EngineMessage::Trigger {
                    frequency,
                    velocity,
                } => self.trigger(frequency, velocity),
                EngineMessage::SelectTimbre(timbre) => {
                    // Only routing changes; slots already sounding keep
                    // playing to completion.
                    self.active = timbre;
                }
                EngineMessage::SetGain(value) => {
                    self.gain.ramp_to(value, GAIN_RAMP_SECS, self.sample_rate);
                }
                EngineMessage::SequenceStart => self.sequencer.start(),
                EngineMessage::SequenceStop => self.sequencer.stop(),
                EngineMessage::FadeOut => {
                    self.gain
                        .ramp_to(0.0, TEARDOWN_RAMP_SECS, self.sample_rate);
                }
            }
        }
    }

    fn trigger(&mut self, frequency: f32, velocity: f32) {
        let hold = (KEY_HOLD_SECS * self.sample_rate) as u64;
        let active = self.active;

        if let Some((timbre, slot)) = self.slots.iter_mut().find(|(t, _)| *t == active) {
            // Unpitched presets are not retuned by the keyboard; they keep
            // whatever pitch their graph pins internally.
            let frequency = if timbre.is_pitched() {
                frequency
            } else {
                slot.frequency()
            };
            slot.trigger(frequency, velocity, hold, self.sample_rate);
        }
    }
}
