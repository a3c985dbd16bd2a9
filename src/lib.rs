//! # trivia-quiz
//!
//! A terminal trivia quiz. Questions come from Open Trivia DB, or from a
//! small built-in set when the service cannot be reached. Each question has
//! a countdown, and the pool can be narrowed to one difficulty level.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Quiz, QuizConfig, QuizError, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::new(QuizConfig::default(), SourceConfig::default());
//!     quiz.run().await
//! }
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod input;
pub mod logging;
mod models;
mod session;
pub mod terminal;
pub mod timer;
mod ui;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

pub use app::{App, AppEvent};
pub use config::{QuizConfig, SourceConfig};
pub use data::{RawQuestion, fallback_questions, fetch_or_fallback, fetch_remote, prepare};
pub use error::{FetchError, QuizError};
pub use models::{AnswerOption, Level, Question};
pub use session::{AnswerRecord, Outcome, Phase, Round, Session, Transition};

/// A quiz that can be run in the terminal.
pub struct Quiz {
    config: QuizConfig,
    source: SourceConfig,
    seed: Option<u64>,
}

impl Quiz {
    pub fn new(config: QuizConfig, source: SourceConfig) -> Self {
        Self {
            config,
            source,
            seed: None,
        }
    }

    /// Use a fixed seed for question order, levels and option order.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, fetch the questions in the
    /// background and return when the user quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(self.config, rng, tx.clone());
        let mut term = terminal::init()?;

        let source = self.source;
        let fetch = tokio::spawn(async move {
            let questions = fetch_or_fallback(&source).await;
            let _ = tx.send(AppEvent::QuestionsFetched(questions));
        });

        let result = run_event_loop(&mut term, &mut app, rx).await;
        terminal::restore()?;
        fetch.abort();
        result
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    mut events: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<(), QuizError> {
    let mut keys = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            Some(event) = events.recv() => app.handle_event(event),
        }
    }

    Ok(())
}
