use crossbeam_channel::Sender;

use crate::timbre::Timbre;

use super::{keyboard_freq, midi_key_freq};

/// Control messages drained by the engine at the start of each block.
#[derive(Debug, Clone, Copy)]
pub enum EngineMessage {
    /// Attack the active timbre at a frequency; release is scheduled by
    /// the engine after the fixed hold.
    Trigger { frequency: f32, velocity: f32 },
    /// Route subsequent triggers to another preset's instance.
    SelectTimbre(Timbre),
    /// Ramp the shared gain stage to a new level (clamped to [0, 1]).
    SetGain(f32),
    SequenceStart,
    SequenceStop,
    /// Teardown ramp to silence, so the stream can be dropped click-free.
    FadeOut,
}

/// Cloneable control handle held by the UI loop and the MIDI callbacks.
///
/// Sends are best-effort: if the engine is gone or the queue is full the
/// message is silently dropped. Triggering before the audio side exists is
/// therefore a no-op, not an error.
#[derive(Clone)]
pub struct EngineHandle {
    tx: Sender<EngineMessage>,
}

impl EngineHandle {
    pub(crate) fn new(tx: Sender<EngineMessage>) -> Self {
        Self { tx }
    }

    /// Trigger a note from the on-screen keyboard: octave plus scale
    /// degree, with the humanizing detune applied here on the control
    /// thread.
    pub fn trigger_degree(&self, octave: i32, degree: i32) {
        self.send(EngineMessage::Trigger {
            frequency: keyboard_freq(octave, degree),
            velocity: 1.0,
        });
    }

    /// Trigger a note from an external MIDI controller.
    pub fn trigger_midi_key(&self, key: u8, velocity: u8) {
        self.send(EngineMessage::Trigger {
            frequency: midi_key_freq(key),
            velocity: velocity as f32 / 127.0,
        });
    }

    pub fn select_timbre(&self, timbre: Timbre) {
        self.send(EngineMessage::SelectTimbre(timbre));
    }

    pub fn set_gain(&self, value: f32) {
        self.send(EngineMessage::SetGain(value));
    }

    pub fn sequence_start(&self) {
        self.send(EngineMessage::SequenceStart);
    }

    pub fn sequence_stop(&self) {
        self.send(EngineMessage::SequenceStop);
    }

    pub fn fade_out(&self) {
        self.send(EngineMessage::FadeOut);
    }

    fn send(&self, msg: EngineMessage) {
        let _ = self.tx.try_send(msg);
    }
}
