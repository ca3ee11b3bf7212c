//! The closed set of playable presets.
//!
//! Each variant has one constructor function that builds its node graph.
//! The set is fixed: an unrecognized name is a programmer or config error
//! and fails fast at construction, never mid-performance.

mod fm;
mod membrane;
mod mono;
mod noise;

pub use fm::fm;
pub use membrane::membrane;
pub use mono::mono;
pub use noise::noise;

use crate::graph::GraphNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timbre {
    Mono,
    Fm,
    Membrane,
    Noise,
}

impl Timbre {
    pub const ALL: [Timbre; 4] = [Timbre::Mono, Timbre::Fm, Timbre::Membrane, Timbre::Noise];

    pub fn label(self) -> &'static str {
        match self {
            Timbre::Mono => "mono",
            Timbre::Fm => "fm",
            Timbre::Membrane => "membrane",
            Timbre::Noise => "noise",
        }
    }

    /// Whether triggers should hand this preset a note frequency.
    /// Percussive presets keep their own pitch (or none at all).
    pub fn is_pitched(self) -> bool {
        matches!(self, Timbre::Mono | Timbre::Fm)
    }

    /// The next preset in display order, wrapping. Used by the UI cycler.
    pub fn next(self) -> Timbre {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn from_name(name: &str) -> Result<Timbre, UnknownTimbre> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label() == name)
            .ok_or_else(|| UnknownTimbre {
                name: name.to_string(),
            })
    }

    /// Build a fresh instance of this preset's node graph.
    pub fn build(self) -> Box<dyn GraphNode> {
        match self {
            Timbre::Mono => Box::new(mono()),
            Timbre::Fm => Box::new(fm()),
            Timbre::Membrane => Box::new(membrane()),
            Timbre::Noise => Box::new(noise()),
        }
    }
}

/// Raised when a preset name is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTimbre {
    pub name: String,
}

impl std::fmt::Display for UnknownTimbre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown synth type {:?} (expected one of: mono, fm, membrane, noise)",
            self.name
        )
    }
}

impl std::error::Error for UnknownTimbre {}
