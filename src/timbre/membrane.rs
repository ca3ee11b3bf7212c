//! Drum-head voice: a sine pinned near its fundamental with a fast pitch
//! sweep dropping onto it, like a kick or low tom. Unpitched: the keyboard
//! note is ignored, every hit lands on the same fundamental.

use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    oscillator::{OscNode, OscParam},
};

pub fn membrane() -> impl crate::graph::GraphNode {
    let pitch_sweep = EnvNode::adsr(0.001, 0.05, 0.0, 0.05);

    OscNode::sine()
        .with_frequency(55.0)
        .modulate(pitch_sweep, OscParam::Frequency, 440.0)
        .amplify(EnvNode::adsr(0.001, 0.4, 0.0, 0.3))
}
