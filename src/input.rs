use crossterm::event::KeyCode;

use crate::app::App;
use crate::session::Phase;

/// Returns true if the app should exit.
pub fn handle_key(app: &mut App, key: KeyCode) -> bool {
    if app.is_editing_filter() {
        handle_filter_input(app, key);
        return false;
    }

    match app.session().phase() {
        Phase::Loading => is_quit(key),
        Phase::Asking(_) => handle_quiz_input(app, key),
        Phase::NoMatches => handle_no_matches_input(app, key),
        Phase::Ended => handle_result_input(app, key),
    }
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char('h') | KeyCode::Char('H') => app.reveal_hint(),
        KeyCode::Char('/') | KeyCode::Char('f') => app.start_filter_edit(),
        key => return is_quit(key),
    }
    false
}

fn handle_no_matches_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('/') | KeyCode::Char('f') => {
            app.start_filter_edit();
            false
        }
        key => is_quit(key),
    }
}

fn handle_filter_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc => app.stop_filter_edit(),
        KeyCode::Backspace => app.filter_pop(),
        KeyCode::Char(c) => app.filter_push(c),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        key => return is_quit(key),
    }
    false
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio::sync::mpsc;

    use super::*;
    use crate::config::QuizConfig;
    use crate::models::{Level, Question};

    fn started_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(QuizConfig::default(), StdRng::seed_from_u64(1), tx);
        app.start_with(vec![
            Question::new("a", "right", vec!["wrong".to_string()], Level::Two),
            Question::new("b", "right", vec!["wrong".to_string()], Level::One),
        ]);
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_from_quiz() {
        let mut app = started_app();
        assert!(handle_key(&mut app, KeyCode::Char('q')));
        assert!(!handle_key(&mut app, KeyCode::Char('x')));
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_editing_swallows_quit_key() {
        let mut app = started_app();
        handle_key(&mut app, KeyCode::Char('/'));
        assert!(app.is_editing_filter());

        assert!(!handle_key(&mut app, KeyCode::Char('q')));
        assert_eq!(app.filter(), "q");
        assert_eq!(app.session().phase(), &Phase::NoMatches);

        handle_key(&mut app, KeyCode::Backspace);
        handle_key(&mut app, KeyCode::Char('2'));
        handle_key(&mut app, KeyCode::Enter);

        assert!(!app.is_editing_filter());
        assert_eq!(app.session().active_len(), 1);
        assert_eq!(app.session().current_question().unwrap().text, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_answers_and_h_reveals_hint() {
        let mut app = started_app();
        handle_key(&mut app, KeyCode::Char('h'));
        assert!(app.session().round().unwrap().hint_revealed);

        handle_key(&mut app, KeyCode::Enter);
        assert!(app.session().round().unwrap().is_locked());
    }
}
