// External interfaces: MIDI message decoding. The hardware side (port
// enumeration, connection lifetime) lives in the binary, next to the
// device it talks to.

pub mod midi;
