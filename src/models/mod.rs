pub mod bank;
pub mod difficulty;
pub mod grammar_point;
pub mod question;
pub mod sentence;

pub use bank::builtin_bank;
pub use difficulty::Difficulty;
pub use grammar_point::GrammarPoint;
pub use question::{Explanation, Question};
pub use sentence::{render_sentence, SentencePart, BLANK_MARKER};
