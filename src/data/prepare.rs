use html_escape::decode_html_entities;
use rand::Rng;
use rand::seq::SliceRandom;

use super::RawQuestion;
use crate::models::{Level, Question};

/// Turn raw records into playable questions: decode entities, give each a
/// random level, then shuffle the whole set.
pub fn prepare<R: Rng + ?Sized>(raw: Vec<RawQuestion>, rng: &mut R) -> Vec<Question> {
    let mut questions: Vec<Question> = raw
        .into_iter()
        .map(|raw| {
            let mut question = Question::new(
                decode(&raw.question),
                decode(&raw.correct_answer),
                raw.incorrect_answers.iter().map(|a| decode(a)).collect(),
                Level::random(rng),
            );
            question.category = raw.category.as_deref().map(decode);
            question
        })
        .collect();

    questions.shuffle(rng);
    questions
}

fn decode(text: &str) -> String {
    decode_html_entities(text).into_owned()
}
