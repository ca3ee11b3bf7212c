//! The default keyboard voice: a single sawtooth through a low-pass
//! filter, shaped by a sustaining envelope. Bright enough to cut through,
//! long release so held keys trail off naturally.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

pub fn mono() -> impl crate::graph::GraphNode {
    OscNode::sawtooth()
        .through(FilterNode::lowpass(2_600.0))
        .amplify(EnvNode::adsr(0.005, 0.1, 0.9, 1.0))
}
