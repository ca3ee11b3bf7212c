/*
Pitch names in scientific notation: a letter A-G, an optional accidental
(# or b), and an octave number. C4 is MIDI note 60, A4 is 69:

    midi = 12 * (octave + 1) + semitone(letter) + accidental

Enharmonic spellings map to the same note (F#3 == Gb3).
*/

/// Errors from parsing a pitch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchError {
    Empty,
    /// The leading character is not a note letter A-G.
    BadLetter(char),
    /// Missing or non-numeric octave suffix.
    BadOctave(String),
    /// Parsed fine but lands outside MIDI range 0-127.
    OutOfRange(i32),
}

impl std::fmt::Display for PitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PitchError::Empty => write!(f, "empty pitch name"),
            PitchError::BadLetter(c) => write!(f, "bad note letter {c:?} (expected A-G)"),
            PitchError::BadOctave(s) => write!(f, "bad octave suffix {s:?}"),
            PitchError::OutOfRange(n) => write!(f, "pitch {n} outside MIDI range 0-127"),
        }
    }
}

impl std::error::Error for PitchError {}

/// Parse a pitch name like "C4", "F#3" or "Eb4" into a MIDI note number.
pub fn parse_pitch(name: &str) -> Result<u8, PitchError> {
    let mut chars = name.chars();
    let letter = chars.next().ok_or(PitchError::Empty)?;

    let semitone: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        other => return Err(PitchError::BadLetter(other)),
    };

    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };

    let octave: i32 = octave_str
        .parse()
        .map_err(|_| PitchError::BadOctave(octave_str.to_string()))?;

    let midi = 12 * (octave + 1) + semitone + accidental;
    if !(0..=127).contains(&midi) {
        return Err(PitchError::OutOfRange(midi));
    }
    Ok(midi as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitches() {
        assert_eq!(parse_pitch("C4"), Ok(60));
        assert_eq!(parse_pitch("A4"), Ok(69));
        assert_eq!(parse_pitch("C-1"), Ok(0));
        assert_eq!(parse_pitch("G9"), Ok(127));
    }

    #[test]
    fn accidentals() {
        assert_eq!(parse_pitch("F#3"), Ok(54));
        assert_eq!(parse_pitch("Gb3"), Ok(54));
        assert_eq!(parse_pitch("Eb4"), Ok(63));
        assert_eq!(parse_pitch("D#4"), Ok(63));
    }

    #[test]
    fn lowercase_letters_are_accepted() {
        assert_eq!(parse_pitch("a4"), Ok(69));
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert_eq!(parse_pitch(""), Err(PitchError::Empty));
        assert_eq!(parse_pitch("H4"), Err(PitchError::BadLetter('H')));
        assert!(matches!(parse_pitch("C"), Err(PitchError::BadOctave(_))));
        assert!(matches!(parse_pitch("C#"), Err(PitchError::BadOctave(_))));
        assert!(matches!(parse_pitch("A9"), Err(PitchError::OutOfRange(_))));
    }
}
