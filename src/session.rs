//! Quiz session state machine.
//!
//! [`Session`] holds everything that changes while the quiz is played and
//! reports what each operation did as a [`Transition`]. It never touches
//! timers or the terminal; the controller reacts to transitions instead.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::{AnswerOption, Question};

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Questions have not arrived yet.
    Loading,
    /// A question is on screen.
    Asking(Round),
    /// The level filter matched nothing.
    NoMatches,
    /// Every active question has been shown.
    Ended,
}

/// The question on screen and the user's interaction with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub options: Vec<AnswerOption>,
    /// Option the user picked. Once set, the round is locked.
    pub selected: Option<usize>,
    pub hint_revealed: bool,
}

impl Round {
    pub fn is_locked(&self) -> bool {
        self.selected.is_some()
    }

    pub fn correct_option(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_correct)
    }
}

/// Result of a session operation, used to drive timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new question is on screen.
    Question,
    /// The current question was answered.
    Answered { correct: bool },
    /// The filter left nothing to show.
    NoMatches,
    /// The quiz is over.
    Ended,
    /// Nothing that affects timers changed.
    Same,
}

/// How a shown question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    TimedOut,
}

/// One entry of the answer history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_text: String,
    pub outcome: Outcome,
}

pub struct Session {
    questions: Vec<Question>,
    /// Positions into `questions` that pass the current filter.
    active: Vec<usize>,
    index: usize,
    score: usize,
    time_limit_secs: u32,
    remaining_secs: u32,
    phase: Phase,
    history: Vec<AnswerRecord>,
}

impl Session {
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            questions: Vec::new(),
            active: Vec::new(),
            index: 0,
            score: 0,
            time_limit_secs,
            remaining_secs: time_limit_secs,
            phase: Phase::Loading,
            history: Vec::new(),
        }
    }

    /// Install the loaded questions and show the first one.
    pub fn load<R: Rng + ?Sized>(&mut self, questions: Vec<Question>, rng: &mut R) -> Transition {
        self.active = (0..questions.len()).collect();
        self.questions = questions;
        self.index = 0;
        self.show_current(rng)
    }

    /// Answer the current question with the option at `option`.
    pub fn select(&mut self, option: usize) -> Transition {
        let Phase::Asking(round) = &mut self.phase else {
            return Transition::Same;
        };
        if round.is_locked() || option >= round.options.len() {
            return Transition::Same;
        }

        round.selected = Some(option);
        let correct = round.options[option].is_correct;
        if correct {
            self.score += 1;
        }

        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Wrong
        };
        self.record(outcome);
        debug!(index = self.index, correct, score = self.score, "answer selected");

        Transition::Answered { correct }
    }

    /// One second of the countdown elapsed.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
        match &self.phase {
            Phase::Asking(round) if !round.is_locked() => {}
            _ => return Transition::Same,
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Transition::Same;
        }

        debug!(index = self.index, "time ran out");
        self.record(Outcome::TimedOut);
        self.advance(rng)
    }

    /// Move past the current question.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
        if !matches!(self.phase, Phase::Asking(_)) {
            return Transition::Same;
        }
        self.index += 1;
        self.show_current(rng)
    }

    /// Restrict the active questions to a level keyword. An empty keyword
    /// restores the full set.
    pub fn apply_filter<R: Rng + ?Sized>(&mut self, keyword: &str, rng: &mut R) -> Transition {
        if matches!(self.phase, Phase::Loading | Phase::Ended) {
            return Transition::Same;
        }

        let keyword = keyword.trim();
        self.active = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, question)| keyword.is_empty() || question.level.to_string() == keyword)
            .map(|(position, _)| position)
            .collect();
        self.index = 0;
        debug!(keyword, matches = self.active.len(), "filter applied");

        self.show_current(rng)
    }

    /// Reveal the correct answer of the current question.
    pub fn reveal_hint(&mut self) {
        if let Phase::Asking(round) = &mut self.phase {
            round.hint_revealed = true;
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Asking(round) => Some(round),
            _ => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.active
            .get(self.index)
            .and_then(|&position| self.questions.get(position))
    }

    /// One-based number of the current question and the active total.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.active.len())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn active_questions(&self) -> impl Iterator<Item = &Question> + '_ {
        self.active.iter().map(|&position| &self.questions[position])
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Correct answers and the size of the active set, as shown at the end.
    pub fn final_score(&self) -> (usize, usize) {
        (self.score, self.active.len())
    }

    /// Final score as "correct/total".
    pub fn final_score_text(&self) -> String {
        let (score, total) = self.final_score();
        format!("{}/{}", score, total)
    }

    fn show_current<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
        if self.active.is_empty() {
            self.phase = Phase::NoMatches;
            return Transition::NoMatches;
        }

        let Some(question) = self.current_question() else {
            self.phase = Phase::Ended;
            debug!(score = self.score, total = self.active.len(), "quiz ended");
            return Transition::Ended;
        };

        let mut options: Vec<AnswerOption> = question.answers().collect();
        options.shuffle(rng);

        self.remaining_secs = self.time_limit_secs;
        self.phase = Phase::Asking(Round {
            options,
            selected: None,
            hint_revealed: false,
        });
        Transition::Question
    }

    fn record(&mut self, outcome: Outcome) {
        let question_text = self
            .current_question()
            .map(|question| question.text.clone())
            .unwrap_or_default();
        self.history.push(AnswerRecord {
            question_text,
            outcome,
        });
    }
}
