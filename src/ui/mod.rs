mod loading;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session().phase() {
        Phase::Loading => loading::render(frame, area),
        Phase::Asking(_) | Phase::NoMatches => quiz::render(frame, area, app),
        Phase::Ended => result::render(frame, area, app),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::app::App;

    /// Draw the app into an off-screen buffer and return its text, one
    /// line per row.
    pub fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
