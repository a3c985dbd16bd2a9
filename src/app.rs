use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::config::QuizConfig;
use crate::data::{RawQuestion, prepare};
use crate::models::Question;
use crate::session::{Phase, Session, Transition};
use crate::timer::{ScheduledTask, TaskId, TaskIds};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Events delivered to the app from background tasks.
#[derive(Debug, Clone)]
pub enum AppEvent {
    QuestionsFetched(Vec<RawQuestion>),
    CountdownTick(TaskId),
    AdvanceDue(TaskId),
}

/// Owns the session, the random source and the timers.
pub struct App {
    session: Session,
    config: QuizConfig,
    rng: StdRng,
    events: UnboundedSender<AppEvent>,
    task_ids: TaskIds,
    countdown: Option<ScheduledTask>,
    pending_advance: Option<ScheduledTask>,
    selected_option: usize,
    filter: String,
    editing_filter: bool,
    result_scroll: usize,
}

impl App {
    pub fn new(config: QuizConfig, rng: StdRng, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            session: Session::new(config.time_limit_secs),
            config,
            rng,
            events,
            task_ids: TaskIds::default(),
            countdown: None,
            pending_advance: None,
            selected_option: 0,
            filter: String::new(),
            editing_filter: false,
            result_scroll: 0,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::QuestionsFetched(raw) => {
                let questions = prepare(raw, &mut self.rng);
                self.start_with(questions);
            }
            AppEvent::CountdownTick(id) => {
                if self.countdown.as_ref().is_some_and(|task| task.id() == id) {
                    let transition = self.session.tick(&mut self.rng);
                    self.apply(transition);
                }
            }
            AppEvent::AdvanceDue(id) => {
                if self.pending_advance.as_ref().is_some_and(|task| task.id() == id) {
                    self.pending_advance = None;
                    let transition = self.session.advance(&mut self.rng);
                    self.apply(transition);
                }
            }
        }
    }

    /// Begin the quiz with already prepared questions.
    pub fn start_with(&mut self, questions: Vec<Question>) {
        if !matches!(self.session.phase(), Phase::Loading) {
            return;
        }
        info!(count = questions.len(), "starting quiz");
        let transition = self.session.load(questions, &mut self.rng);
        self.apply(transition);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn select_next_option(&mut self) {
        if let Some(round) = self.unlocked_round_len() {
            self.selected_option = (self.selected_option + 1) % round;
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(round) = self.unlocked_round_len() {
            self.selected_option = (self.selected_option + round - 1) % round;
        }
    }

    /// Answer with the option under the cursor.
    pub fn submit_answer(&mut self) {
        self.choose_option(self.selected_option);
    }

    pub fn choose_option(&mut self, option: usize) {
        let transition = self.session.select(option);
        self.apply(transition);
    }

    pub fn reveal_hint(&mut self) {
        self.session.reveal_hint();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_editing_filter(&self) -> bool {
        self.editing_filter
    }

    pub fn start_filter_edit(&mut self) {
        if self.accepts_filter() {
            self.editing_filter = true;
        }
    }

    pub fn stop_filter_edit(&mut self) {
        self.editing_filter = false;
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    pub fn filter_pop(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    /// Replace the whole filter text.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.refilter();
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.history().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    fn accepts_filter(&self) -> bool {
        !matches!(self.session.phase(), Phase::Loading | Phase::Ended)
    }

    fn refilter(&mut self) {
        if !self.accepts_filter() {
            return;
        }
        let transition = self.session.apply_filter(&self.filter, &mut self.rng);
        self.apply(transition);
    }

    fn unlocked_round_len(&self) -> Option<usize> {
        self.session
            .round()
            .filter(|round| !round.is_locked() && !round.options.is_empty())
            .map(|round| round.options.len())
    }

    /// Bring timers in line with what the session just did.
    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Question => {
                self.pending_advance = None;
                self.selected_option = 0;
                self.restart_countdown();
            }
            Transition::Answered { .. } => {
                self.countdown = None;
                let id = self.task_ids.next_id();
                self.pending_advance = Some(ScheduledTask::once(
                    id,
                    self.config.feedback_delay,
                    self.events.clone(),
                    AppEvent::AdvanceDue(id),
                ));
            }
            Transition::NoMatches => {
                self.countdown = None;
                self.pending_advance = None;
            }
            Transition::Ended => {
                self.countdown = None;
                self.pending_advance = None;
                self.editing_filter = false;
                let (score, total) = self.session.final_score();
                info!(score, total, "quiz finished");
            }
            Transition::Same => {}
        }
        debug!(?transition, "transition applied");
    }

    fn restart_countdown(&mut self) {
        if let Some(previous) = self.countdown.take() {
            previous.cancel();
        }
        let id = self.task_ids.next_id();
        self.countdown = Some(ScheduledTask::repeating(
            id,
            COUNTDOWN_PERIOD,
            self.events.clone(),
            AppEvent::CountdownTick(id),
        ));
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    use super::*;
    use crate::data::fallback_questions;
    use crate::models::Level;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(QuizConfig::default(), StdRng::seed_from_u64(5), tx);
        (app, rx)
    }

    fn levelled(levels: &[Level]) -> Vec<Question> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                Question::new(
                    format!("question {}", i),
                    "yes",
                    vec!["no".to_string(), "maybe".to_string()],
                    *level,
                )
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetched_questions_start_the_countdown() {
        let (mut app, _rx) = app();
        assert!(!app.has_countdown());

        app.handle_event(AppEvent::QuestionsFetched(fallback_questions()));

        assert!(matches!(app.session().phase(), Phase::Asking(_)));
        assert!(app.has_countdown());
        assert_eq!(app.session().position(), (1, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_stops_countdown_and_schedules_advance() {
        let (mut app, _rx) = app();
        app.start_with(levelled(&[Level::One, Level::Two]));

        app.submit_answer();

        assert!(!app.has_countdown());
        assert!(app.has_pending_advance());
        assert!(app.session().round().unwrap().is_locked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_is_frozen_after_answer() {
        let (mut app, _rx) = app();
        app.start_with(levelled(&[Level::One]));

        app.select_next_option();
        assert_eq!(app.selected_option(), 1);
        app.submit_answer();
        app.select_next_option();
        assert_eq!(app.selected_option(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_wraps_around() {
        let (mut app, _rx) = app();
        app.start_with(levelled(&[Level::One]));

        app.select_previous_option();
        assert_eq!(app.selected_option(), 2);
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_ignored() {
        let (mut app, mut rx) = app();
        app.start_with(levelled(&[Level::One, Level::One]));

        let Some(AppEvent::CountdownTick(stale)) = rx.recv().await else {
            panic!("expected a countdown tick");
        };
        app.set_filter("1");
        let before = app.session().remaining_secs();

        app.handle_event(AppEvent::CountdownTick(stale));

        assert_eq!(app.session().remaining_secs(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_cancels_pending_advance() {
        let (mut app, mut rx) = app();
        app.start_with(levelled(&[Level::One, Level::Two, Level::Two]));
        app.choose_option(0);
        assert!(app.has_pending_advance());

        app.set_filter("2");

        assert!(!app.has_pending_advance());
        assert!(app.has_countdown());
        assert_eq!(app.session().position(), (1, 2));

        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(event) = rx.try_recv() {
            assert!(!matches!(event, AppEvent::AdvanceDue(_)));
            app.handle_event(event);
        }
        assert_eq!(app.session().index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_filter_result_runs_no_timer() {
        let (mut app, _rx) = app();
        app.start_with(levelled(&[Level::One, Level::Three]));

        app.start_filter_edit();
        app.filter_push('2');

        assert_eq!(app.session().phase(), &Phase::NoMatches);
        assert!(!app.has_countdown());
        assert!(!app.has_pending_advance());

        app.filter_pop();
        assert!(app.has_countdown());
        assert_eq!(app.session().active_len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_is_locked_after_end() {
        let (mut app, mut rx) = app();
        app.start_with(levelled(&[Level::One]));
        app.submit_answer();
        while !app.session().is_ended() {
            let event = rx.recv().await.unwrap();
            app.handle_event(event);
        }

        app.start_filter_edit();
        assert!(!app.is_editing_filter());
        app.set_filter("2");
        assert!(app.session().is_ended());
        assert_eq!(app.session().final_score().1, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_scroll_is_bounded() {
        let (mut app, mut rx) = app();
        app.start_with(levelled(&[Level::One, Level::Two]));
        while !app.session().is_ended() {
            app.submit_answer();
            let event = rx.recv().await.unwrap();
            app.handle_event(event);
        }

        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 1);
        app.scroll_results_up();
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 0);
    }
}
