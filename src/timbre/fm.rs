//! Two-operator FM voice. Modulator at 3x the note frequency with a fairly
//! hot index gives the metallic, bell-ish character; the envelope sustains
//! at full level so the timbre itself does the movement.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::FmOscNode};

pub fn fm() -> impl crate::graph::GraphNode {
    FmOscNode::new(3.0, 10.0).amplify(EnvNode::adsr(0.01, 0.01, 1.0, 0.5))
}
