use super::RawQuestion;

/// Built-in questions used whenever the remote service is unavailable.
pub fn fallback_questions() -> Vec<RawQuestion> {
    vec![
        RawQuestion::new(
            "What is the capital of France?",
            "Paris",
            &["Lyon", "Marseille", "Bordeaux"],
        ),
        RawQuestion::new(
            "In which year did humans first walk on the Moon?",
            "1969",
            &["1965", "1972", "1975"],
        ),
        RawQuestion::new(
            "What colour was Henri IV&#039;s white horse?",
            "White",
            &["Black", "Grey", "Brown"],
        ),
    ]
}
