//! End-to-end behavior of the engine: the properties a user would notice
//! from the keyboard: gain ramps, timbre routing, transport semantics.

use keybed::engine::{keyboard_freq, Engine, EngineSnapshot, DEGREES, STARTUP_GAIN};
use keybed::graph::midi_to_freq;
use keybed::sequencing::SEQ_BPM;
use keybed::timbre::Timbre;
use rtrb::RingBuffer;

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 256;

fn render_blocks(engine: &mut Engine, blocks: usize) -> Vec<f32> {
    let mut buffer = vec![0.0f32; BLOCK];
    let mut all = Vec::with_capacity(blocks * BLOCK);
    for _ in 0..blocks {
        engine.render(&mut buffer);
        all.extend_from_slice(&buffer);
    }
    all
}

fn rms(buffer: &[f32]) -> f32 {
    (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
}

#[test]
fn frequency_formula_holds_for_every_degree_and_octave() {
    for octave in [-2, 0, 3, 7] {
        for degree in DEGREES {
            for _ in 0..20 {
                let freq = keyboard_freq(octave, degree);
                let base = midi_to_freq(octave * 12 + degree);
                let jitter = freq / base;
                assert!(freq.is_finite() && freq > 0.0);
                assert!(
                    (0.99..=1.01).contains(&jitter),
                    "octave {octave} degree {degree}: jitter {jitter}"
                );
            }
        }
    }
}

#[test]
fn gain_slider_value_becomes_the_stage_level() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24); // finish the startup fade
    assert!((engine.gain_level() - STARTUP_GAIN).abs() < 1e-4);

    for target in [0.13, 0.8, 1.0, 0.0] {
        handle.set_gain(target);
        // 100ms ramp at 48kHz = 4800 samples; give it 24 blocks.
        render_blocks(&mut engine, 24);
        assert!(
            (engine.gain_level() - target).abs() < 1e-4,
            "target {target}, level {}",
            engine.gain_level()
        );
    }

    // Out-of-range values clamp rather than overdrive.
    handle.set_gain(2.5);
    render_blocks(&mut engine, 24);
    assert!((engine.gain_level() - 1.0).abs() < 1e-4);
}

#[test]
fn timbre_selection_routes_triggers_without_cutting_tails() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24);

    handle.trigger_degree(3, 0);
    let sounding = render_blocks(&mut engine, 4);
    assert!(rms(&sounding) > 1e-4, "triggered note should be audible");

    // Switch presets mid-note: nothing new triggered, the tail carries on.
    handle.select_timbre(Timbre::Noise);
    let tail = render_blocks(&mut engine, 2);
    assert!(rms(&tail) > 1e-4, "tail must survive the switch");
    assert_eq!(engine.active_timbre(), Timbre::Noise);

    // The new preset is what subsequent triggers play.
    handle.trigger_degree(3, 0);
    let layered = render_blocks(&mut engine, 2);
    assert!(rms(&layered) > 1e-4);
    assert!(engine.any_slot_sounding());
}

#[test]
fn octave_is_unbounded_and_negative_octaves_render_finite_audio() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24);

    for octave in [-8, -1, 11] {
        handle.trigger_degree(octave, 21);
        let output = render_blocks(&mut engine, 4);
        assert!(output.iter().all(|s| s.is_finite()), "octave {octave}");
    }
}

#[test]
fn sequence_fires_on_the_sixteenth_grid_and_stop_resumes_mid_sequence() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24);

    let samples_per_step = SAMPLE_RATE as f64 * 60.0 / SEQ_BPM / 4.0;
    let blocks_per_step = (samples_per_step / BLOCK as f64).ceil() as usize + 1;

    assert!(!engine.sequence_playing());
    handle.sequence_start();

    // Entry 0 fires in the first rendered block after start.
    render_blocks(&mut engine, 1);
    assert!(engine.sequence_playing());
    assert_eq!(engine.sequence_step(), 1);

    // Each further sixteenth advances exactly one entry.
    render_blocks(&mut engine, blocks_per_step);
    assert_eq!(engine.sequence_step(), 2);
    render_blocks(&mut engine, blocks_per_step);
    assert_eq!(engine.sequence_step(), 3);

    // Stop halts the clock where it stands.
    handle.sequence_stop();
    render_blocks(&mut engine, 4 * blocks_per_step);
    assert!(!engine.sequence_playing());
    assert_eq!(engine.sequence_step(), 3);

    // Restart resumes from the stored cursor, not entry 0.
    handle.sequence_start();
    render_blocks(&mut engine, blocks_per_step);
    assert_eq!(engine.sequence_step(), 4);
}

#[test]
fn sequence_is_audible_through_the_delay_bus() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24);

    handle.sequence_start();
    let playing = render_blocks(&mut engine, 8);
    assert!(rms(&playing) > 1e-4);

    // After stop, already-triggered notes and the echo ring out instead of
    // cutting dead.
    handle.sequence_stop();
    let ringing = render_blocks(&mut engine, 2);
    assert!(rms(&ringing) > 1e-6);
}

#[test]
fn teardown_fade_reaches_silence_before_the_stream_would_drop() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    render_blocks(&mut engine, 24);
    handle.trigger_degree(3, 4);
    render_blocks(&mut engine, 2);

    handle.fade_out();
    // 10ms window = 480 samples = 2 blocks at 256.
    render_blocks(&mut engine, 3);
    assert_eq!(engine.gain_level(), 0.0);

    // With the gain at zero the mix is silent even though voices still run.
    let mut buffer = vec![0.0f32; BLOCK];
    engine.render(&mut buffer);
    assert!(buffer.iter().all(|&s| s == 0.0));
}

#[test]
fn telemetry_snapshots_reflect_engine_state() {
    let (mut engine, handle) = Engine::new(SAMPLE_RATE).unwrap();
    let (tx, mut rx) = RingBuffer::<EngineSnapshot>::new(512);
    engine.set_telemetry(tx);

    handle.sequence_start();
    render_blocks(&mut engine, 24);

    let mut latest = EngineSnapshot::default();
    while let Ok(snapshot) = rx.pop() {
        latest = snapshot;
    }
    assert!(latest.sequence_playing);
    assert!(latest.gain > 0.0);
}
