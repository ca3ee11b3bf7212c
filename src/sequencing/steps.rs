use super::pitch::{parse_pitch, PitchError};

/// One sequencer entry: a single pitch or a simultaneous group (chord).
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Single(&'static str),
    Chord(&'static [&'static str]),
}

impl Step {
    pub fn pitches(&self) -> &[&'static str] {
        match self {
            Step::Single(name) => std::slice::from_ref(name),
            Step::Chord(names) => names,
        }
    }
}

/// Tempo of the built-in sequence, in beats per minute. Entries fire one
/// per sixteenth note.
pub const SEQ_BPM: f64 = 86.0;

/// The built-in sequence: an Am-F-C-G turnaround, one bar of sixteenths
/// per chord, with the chord on the downbeat and arpeggiated singles after.
pub const DEMO_STEPS: [Step; 16] = [
    Step::Chord(&["A2", "C4", "E4"]),
    Step::Single("E3"),
    Step::Single("A3"),
    Step::Single("C4"),
    Step::Chord(&["F2", "A3", "C4"]),
    Step::Single("C3"),
    Step::Single("F3"),
    Step::Single("A3"),
    Step::Chord(&["C3", "E3", "G3"]),
    Step::Single("G3"),
    Step::Single("C4"),
    Step::Single("E4"),
    Step::Chord(&["G2", "B3", "D4"]),
    Step::Single("D3"),
    Step::Single("G3"),
    Step::Single("B3"),
];

/// Parse the built-in sequence into MIDI note groups, one `Vec<u8>` per
/// step. A parse failure here is a programmer error in the table above.
pub fn demo_sequence() -> Result<Vec<Vec<u8>>, PitchError> {
    DEMO_STEPS
        .iter()
        .map(|step| step.pitches().iter().map(|name| parse_pitch(name)).collect())
        .collect()
}
