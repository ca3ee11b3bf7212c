//! Musical data for the step sequencer: pitch-name parsing and the
//! built-in chord sequence.

pub mod pitch;
pub mod steps;

pub use pitch::{parse_pitch, PitchError};
pub use steps::{demo_sequence, Step, DEMO_STEPS, SEQ_BPM};
