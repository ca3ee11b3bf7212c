//! Application wiring: audio stream, MIDI bridge, and the TUI event loop.

use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rtrb::{Consumer, RingBuffer};

use keybed::engine::{Engine, EngineHandle, EngineSnapshot, DEGREES, STARTUP_GAIN};
use keybed::graph::gain::TEARDOWN_RAMP_SECS;
use keybed::timbre::Timbre;
use keybed::MAX_BLOCK_SIZE;

use super::midi::MidiBridge;
use super::ui;

const SNAPSHOT_RING_CAPACITY: usize = 64;
const INITIAL_OCTAVE: i32 = 3;
const GAIN_STEP: f32 = 0.01;

/// UI-side state. The engine owns the audible truth; this mirrors the
/// control values the user is editing plus the latest snapshot from the
/// audio thread.
pub struct App {
    pub octave: i32,
    pub gain: f32,
    pub timbre: Timbre,
    pub sequence_on: bool,
    pub snapshot: EngineSnapshot,
    pub midi_ports: usize,
    handle: EngineHandle,
    snapshot_rx: Consumer<EngineSnapshot>,
    should_quit: bool,
}

/// Set up audio, MIDI and the terminal, then hand control to the UI loop.
pub fn run() -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let (mut engine, handle) = Engine::new(sample_rate)?;
    let (snapshot_tx, snapshot_rx) = RingBuffer::<EngineSnapshot>::new(SNAPSHOT_RING_CAPACITY);
    engine.set_telemetry(snapshot_tx);

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames];
                engine.render(block);

                // Mono render duplicated to every channel.
                let out_off = frames_written * channels;
                for (i, &sample) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = sample;
                    }
                }
                frames_written += frames;
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )?;
    stream.play()?;

    let bridge = MidiBridge::connect_all(handle.clone());

    let mut terminal = ratatui::init();
    let app = App {
        octave: INITIAL_OCTAVE,
        gain: STARTUP_GAIN,
        timbre: Timbre::Mono,
        sequence_on: false,
        snapshot: EngineSnapshot::default(),
        midi_ports: bridge.port_count(),
        handle: handle.clone(),
        snapshot_rx,
        should_quit: false,
    };
    let result = app.run(&mut terminal);
    ratatui::restore();

    // Ramp to silence before the stream drops so shutdown never clicks.
    handle.fade_out();
    thread::sleep(Duration::from_secs_f32(TEARDOWN_RAMP_SECS * 2.0));
    drop(stream);
    drop(bridge);

    result
}

impl App {
    fn run(mut self, terminal: &mut ratatui::DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_snapshots();
            terminal.draw(|frame| ui::render(frame, &self))?;

            // ~60fps, non-blocking.
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = snapshot;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Keys 1-9 then 0 map to the ten degrees, left to right.
            KeyCode::Char(c @ '0'..='9') => {
                let idx = if c == '0' {
                    9
                } else {
                    c as usize - '1' as usize
                };
                self.handle.trigger_degree(self.octave, DEGREES[idx]);
            }
            KeyCode::Char('z') => self.octave -= 1,
            KeyCode::Char('x') => self.octave += 1,
            KeyCode::Tab => {
                self.timbre = self.timbre.next();
                self.handle.select_timbre(self.timbre);
            }
            KeyCode::Char(' ') => {
                self.sequence_on = !self.sequence_on;
                if self.sequence_on {
                    self.handle.sequence_start();
                } else {
                    self.handle.sequence_stop();
                }
            }
            KeyCode::Left => self.nudge_gain(-GAIN_STEP),
            KeyCode::Right => self.nudge_gain(GAIN_STEP),
            _ => {}
        }
    }

    fn nudge_gain(&mut self, delta: f32) {
        self.gain = (self.gain + delta).clamp(0.0, 1.0);
        self.handle.set_gain(self.gain);
    }
}
