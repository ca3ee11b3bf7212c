//! Low-level DSP primitives behind the graph nodes.
//!
//! Everything here is allocation-free at render time so it can live inside
//! voice structs that run on the audio callback. Orchestration (note events,
//! parameter plumbing) is layered on top by the `graph` module.

/// Time-domain delay line.
pub mod delay;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Topology-preserving state-variable filter.
pub mod filter;
/// Oscillator waveforms and the noise source.
pub mod oscillator;

pub use envelope::EnvelopeStage;
