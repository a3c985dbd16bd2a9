mod fallback;
mod loader;
mod prepare;

pub use fallback::fallback_questions;
pub use loader::{RawQuestion, fetch_or_fallback, fetch_remote};
pub use prepare::prepare;
