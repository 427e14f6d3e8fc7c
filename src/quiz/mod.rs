// src/quiz/mod.rs

//! Question parsing, sampling and scoring. Everything here is synchronous and
//! works on rows already fetched by a `QuestionSource`.

pub mod loader;
pub mod parser;
pub mod sampler;
pub mod validator;

pub use loader::{fetch_questions, load_questions, load_questions_with};
pub use parser::{RowParser, normalize_code, parse_row};
pub use sampler::sample_questions;
pub use validator::validate;
