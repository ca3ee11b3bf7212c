//! MIDI input bridge: enumerate every input port at startup, attach a
//! decoder callback to each, and keep the connection handles alive for the
//! lifetime of the bridge. Dropping the bridge closes the connections;
//! the devices themselves belong to the OS.
//!
//! Missing or denied MIDI access degrades to a log line; the on-screen
//! keyboard keeps working without it.

use color_eyre::eyre::Result as EyreResult;
use midir::{Ignore, MidiInput, MidiInputConnection};

use keybed::engine::EngineHandle;
use keybed::io::midi::MidiEvent;

pub struct MidiBridge {
    connections: Vec<MidiInputConnection<()>>,
}

impl MidiBridge {
    pub fn connect_all(handle: EngineHandle) -> Self {
        match Self::try_connect(handle) {
            Ok(bridge) => bridge,
            Err(err) => {
                log::warn!("MIDI input unavailable, keyboard only: {err}");
                Self {
                    connections: Vec::new(),
                }
            }
        }
    }

    pub fn port_count(&self) -> usize {
        self.connections.len()
    }

    fn try_connect(handle: EngineHandle) -> EyreResult<Self> {
        let probe = MidiInput::new("keybed")?;
        let port_count = probe.ports().len();
        if port_count == 0 {
            log::info!("no MIDI input ports found");
            return Ok(Self {
                connections: Vec::new(),
            });
        }

        let mut connections = Vec::with_capacity(port_count);
        for index in 0..port_count {
            // midir consumes the MidiInput on connect, so every port gets
            // its own instance.
            let mut input = MidiInput::new("keybed")?;
            input.ignore(Ignore::All);

            let ports = input.ports();
            let Some(port) = ports.get(index) else {
                continue; // port disappeared between probe and connect
            };
            let name = input
                .port_name(port)
                .unwrap_or_else(|_| format!("input {index}"));

            let port_handle = handle.clone();
            let connected = input.connect(
                port,
                "keybed-in",
                move |_timestamp, raw, _| {
                    // Note-off is decoded but produces no effect: releases
                    // come from the engine's fixed hold, not the wire.
                    if let Some(MidiEvent::NoteOn { key, velocity, .. }) = MidiEvent::parse(raw) {
                        port_handle.trigger_midi_key(key, velocity);
                    }
                },
                (),
            );

            match connected {
                Ok(connection) => {
                    log::info!("listening on MIDI input {name:?}");
                    connections.push(connection);
                }
                Err(err) => log::warn!("could not connect MIDI input {name:?}: {err}"),
            }
        }

        Ok(Self { connections })
    }
}
