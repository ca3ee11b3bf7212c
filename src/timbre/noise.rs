//! Noise burst: white noise thinned by a high-pass, with a short
//! no-sustain envelope. Unpitched by nature; the "tss" of the set.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

pub fn noise() -> impl crate::graph::GraphNode {
    OscNode::noise()
        .amplify(EnvNode::adsr(0.005, 0.1, 0.0, 0.08))
        .through(FilterNode::highpass(1_500.0))
}
