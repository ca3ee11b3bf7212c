//! Status bar: timbre, octave, transport state, MIDI ports, gain gauge.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let transport = if app.snapshot.sequence_playing {
        Span::styled(
            format!("▶ step {:>2}/16", app.snapshot.sequence_step + 1),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled("⏹ stopped", Style::default().fg(Color::Yellow))
    };

    let midi = if app.midi_ports > 0 {
        Span::styled(
            format!("midi: {} in", app.midi_ports),
            Style::default().fg(Color::Magenta),
        )
    } else {
        Span::styled("midi: off", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" timbre: {}  ", app.timbre.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("octave: {}  ", app.octave),
            Style::default().fg(Color::White),
        ),
        transport,
        Span::raw("  "),
        midi,
    ]);

    let block = Block::default().title(" keybed ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), halves[0]);

    // The gauge shows the audio thread's actual level, so slider moves
    // visibly ramp instead of jumping; the label is the target value.
    let gauge = Gauge::default()
        .block(Block::default().title(" gain ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(app.snapshot.gain.clamp(0.0, 1.0) as f64)
        .label(format!("{:.2}", app.gain));
    frame.render_widget(gauge, halves[1]);
}
