use std::fmt;

use rand::Rng;
use uuid::Uuid;

/// Difficulty tag assigned to every loaded question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    /// Pick a level uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

/// A prepared question. Text fields are already entity-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub level: Level,
    pub category: Option<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        level: Level,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            level,
            category: None,
        }
    }

    /// Every answer for this question, correct one first.
    pub fn answers(&self) -> impl Iterator<Item = AnswerOption> + '_ {
        std::iter::once(AnswerOption {
            text: self.correct_answer.clone(),
            is_correct: true,
        })
        .chain(self.incorrect_answers.iter().map(|text| AnswerOption {
            text: text.clone(),
            is_correct: false,
        }))
    }
}

/// One selectable answer of the question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_level_text_is_its_digit() {
        assert_eq!(Level::One.to_string(), "1");
        assert_eq!(Level::Two.to_string(), "2");
        assert_eq!(Level::Three.to_string(), "3");
    }

    #[test]
    fn test_random_level_covers_all_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(Level::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_answers_marks_only_the_correct_one() {
        let question = Question::new(
            "Capital of France?",
            "Paris",
            vec!["Lyon".to_string(), "Marseille".to_string()],
            Level::One,
        );
        let answers: Vec<_> = question.answers().collect();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.iter().filter(|a| a.is_correct).count(), 1);
        assert_eq!(answers[0].text, "Paris");
    }
}
