use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::session::{Phase, Round};

const OPTION_LABELS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
const NO_MATCHES_MESSAGE: &str = "No questions match this level.";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app);
    render_filter(frame, chunks[1], app);

    match (app.session().phase(), app.session().current_question()) {
        (Phase::Asking(round), Some(question)) => {
            render_question(frame, chunks[2], question, round);
            render_options(frame, chunks[3], round, app.selected_option());
        }
        _ => render_no_matches(frame, chunks[2]),
    }

    render_controls(frame, chunks[4], app);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let counter = if session.active_len() > 0 {
        let (number, total) = session.position();
        format!("Question {} of {}", number, total)
    } else {
        String::new()
    };
    frame.render_widget(
        Paragraph::new(counter).fg(Color::Cyan).bold(),
        columns[0],
    );

    frame.render_widget(
        Paragraph::new(format!("Score: {}", session.score()))
            .alignment(Alignment::Center)
            .fg(Color::Green),
        columns[1],
    );

    let time = match session.phase() {
        Phase::Asking(_) => format!("Time: {}s", session.remaining_secs()),
        _ => String::new(),
    };
    let time_color = if session.remaining_secs() <= 5 {
        Color::Red
    } else {
        Color::Yellow
    };
    frame.render_widget(
        Paragraph::new(time)
            .alignment(Alignment::Right)
            .fg(time_color),
        columns[2],
    );
}

fn render_filter(frame: &mut Frame, area: Rect, app: &App) {
    let (border, cursor) = if app.is_editing_filter() {
        (Color::Cyan, "_")
    } else {
        (Color::DarkGray, "")
    };

    let text = if app.filter().is_empty() && !app.is_editing_filter() {
        Line::from("all levels".fg(Color::DarkGray))
    } else {
        Line::from(vec![
            Span::styled(app.filter(), Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Level filter ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question(frame: &mut Frame, area: Rect, question: &Question, round: &Round) {
    let mut lines = vec![
        Line::from(Span::styled(
            question.text.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("🦉 Level {}", question.level),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled("  (h reveals the answer)", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    if round.hint_revealed {
        lines.push(Line::from(Span::styled(
            format!("Correct answer: {}", question.correct_answer),
            Style::default().fg(Color::Green),
        )));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));
    if let Some(category) = &question.category {
        block = block.title(format!(" {} ", category));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, round: &Round, cursor: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(round.options.len() * 2);

    for (index, option) in round.options.iter().enumerate() {
        let (marker, style) = option_look(round, index, cursor);
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Marker and style for one option. Once the round is locked the cursor
/// disappears and only correctness is shown.
fn option_look(round: &Round, index: usize, cursor: usize) -> (&'static str, Style) {
    let Some(selected) = round.selected else {
        return if index == cursor {
            (">", Style::default().fg(Color::Cyan).bold())
        } else {
            (" ", Style::default().fg(Color::Gray))
        };
    };

    if round.options[index].is_correct {
        ("✓", Style::default().fg(Color::Green).bold())
    } else if index == selected {
        ("✗", Style::default().fg(Color::Red).bold())
    } else {
        (" ", Style::default().fg(Color::DarkGray))
    }
}

fn render_no_matches(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(NO_MATCHES_MESSAGE)
        .alignment(Alignment::Center)
        .fg(Color::Yellow)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.is_editing_filter() {
        "type a level (1-3)  ·  backspace delete  ·  enter/esc done"
    } else {
        "j/k navigate  ·  enter select  ·  h hint  ·  / filter  ·  q quit"
    };
    let widget = Paragraph::new(help)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
