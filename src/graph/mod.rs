//! Composable audio graph nodes.
//!
//! Nodes wrap the `dsp` primitives with what instruments need: note events,
//! block rendering, and parameter plumbing. The `extensions` module adds the
//! fluent combinators (`.amplify()`, `.through()`, `.modulate()`) that the
//! timbre presets are written with.

/// Multiply two signals (amplitude shaping).
pub mod amplify;
/// Feedback delay effect.
pub mod delay;
/// Envelope generator node.
pub mod envelope;
/// Fluent combinators.
pub mod extensions;
/// Low/high-pass filter node.
pub mod filter;
/// Master gain stage with click-free ramps.
pub mod gain;
/// Connect a control signal to a node parameter.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators, plain and FM.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{midi_to_freq, GraphNode, RenderCtx};
