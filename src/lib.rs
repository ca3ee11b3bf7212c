pub mod dsp;
pub mod engine; // Control messages, timbre slots, transport
pub mod graph; // Composable audio graph nodes
pub mod io;
pub mod sequencing; // Pitch names and the built-in chord sequence
pub mod timbre; // Closed set of playable presets

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
