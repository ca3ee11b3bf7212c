//! The ten on-screen keys, one cell per scale degree. Each cell shows the
//! key to press, the degree offset, and the MIDI note it lands on at the
//! current octave.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keybed::engine::DEGREES;

use crate::app::App;

const KEY_LABELS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

pub fn render_keyboard(frame: &mut Frame, area: Rect, app: &App) {
    let outer = Block::default().title(" keyboard ").borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 10); 10])
        .split(inner);

    for (i, cell) in cells.iter().enumerate() {
        let degree = DEGREES[i];
        let note = app.octave * 12 + degree;

        let body = Paragraph::new(vec![
            Line::from(format!("[{}]", KEY_LABELS[i])),
            Line::from(format!("+{degree}")),
            Line::from(format!("n{note}")),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(body, *cell);
    }
}
