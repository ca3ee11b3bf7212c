/// Keys arriving from an external controller are shifted down this many
/// semitones before triggering, matching the keyboard demo's mapping.
pub const MIDI_KEY_SHIFT: i32 = 24;

/// A decoded channel-voice message. Only the note messages matter here;
/// everything else on the wire is dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
}

impl MidiEvent {
    /// Decode a raw 3-byte channel-voice message.
    ///
    /// Status 0x90-0x9F is note-on, 0x80-0x8F note-off. A note-on with
    /// velocity 0 is the wire's other spelling of note-off and is decoded
    /// as such. Anything shorter than 3 bytes or with another status
    /// returns `None`.
    pub fn parse(raw: &[u8]) -> Option<MidiEvent> {
        let [status, key, velocity] = *raw.first_chunk::<3>()?;
        let channel = status & 0x0F;

        match status & 0xF0 {
            0x90 if velocity > 0 => Some(MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            }),
            0x90 | 0x80 => Some(MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_decodes() {
        assert_eq!(
            MidiEvent::parse(&[0x90, 60, 100]),
            Some(MidiEvent::NoteOn {
                channel: 0,
                key: 60,
                velocity: 100
            })
        );
        // Channel nibble carries through
        assert_eq!(
            MidiEvent::parse(&[0x95, 48, 64]),
            Some(MidiEvent::NoteOn {
                channel: 5,
                key: 48,
                velocity: 64
            })
        );
    }

    #[test]
    fn note_off_decodes() {
        assert_eq!(
            MidiEvent::parse(&[0x82, 60, 0]),
            Some(MidiEvent::NoteOff {
                channel: 2,
                key: 60,
                velocity: 0
            })
        );
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        assert_eq!(
            MidiEvent::parse(&[0x90, 60, 0]),
            Some(MidiEvent::NoteOff {
                channel: 0,
                key: 60,
                velocity: 0
            })
        );
    }

    #[test]
    fn other_statuses_and_short_messages_are_dropped() {
        assert_eq!(MidiEvent::parse(&[0xB0, 1, 64]), None); // control change
        assert_eq!(MidiEvent::parse(&[0xE0, 0, 64]), None); // pitch bend
        assert_eq!(MidiEvent::parse(&[0x90, 60]), None);
        assert_eq!(MidiEvent::parse(&[]), None);
    }
}
