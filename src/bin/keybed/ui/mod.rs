//! TUI for keybed: a status bar with the live gain gauge, the ten-key
//! keyboard, and a help line.

mod keyboard;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

use keyboard::render_keyboard;
use status::render_status;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status bar
            Constraint::Min(5),    // keyboard
            Constraint::Length(1), // help bar
        ])
        .split(area);

    render_status(frame, chunks[0], app);
    render_keyboard(frame, chunks[1], app);

    let help = Paragraph::new(
        " [1-0] Play  [Z/X] Octave  [Tab] Timbre  [Space] Sequence  [←/→] Gain  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
