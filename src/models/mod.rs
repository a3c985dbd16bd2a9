mod question;

pub use question::{AnswerOption, Level, Question};
