// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Option letters in column order (sheet columns C through F).
pub const OPTION_CODES: [&str; 4] = ["A", "B", "C", "D"];

pub const DEFAULT_QUESTION_COUNT: u64 = 5;

/// One answer choice. The code is derived from the column the text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "texto")]
    pub text: String,
}

/// A question parsed from one spreadsheet row, answer included.
/// Never serialized to clients; see `ClientQuestion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Two to four options, in column order.
    pub options: Vec<QuestionOption>,
    /// Trimmed, uppercased letter from column G.
    pub correct_answer: String,
}

/// DTO for sending a question to the client (answer stripped, options shuffled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientQuestion {
    pub id: String,
    #[serde(rename = "pregunta")]
    pub text: String,
    #[serde(rename = "opciones")]
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub preguntas: Vec<ClientQuestion>,
}

/// DTO for requesting a batch of questions.
///
/// `cantidad` is kept as raw JSON so that strings, floats and booleans are
/// reported as a 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct GetQuestionsRequest {
    #[serde(default = "default_cantidad")]
    #[validate(custom(function = validate_cantidad))]
    pub cantidad: serde_json::Value,
}

impl Default for GetQuestionsRequest {
    fn default() -> Self {
        Self {
            cantidad: default_cantidad(),
        }
    }
}

impl GetQuestionsRequest {
    /// The requested count once `validate` has accepted it.
    pub fn count(&self) -> Option<usize> {
        positive_integer(&self.cantidad)
    }
}

fn default_cantidad() -> serde_json::Value {
    serde_json::Value::from(DEFAULT_QUESTION_COUNT)
}

/// Integers too large for `usize` saturate; the sampler caps them to the pool.
fn positive_integer(value: &serde_json::Value) -> Option<usize> {
    let serde_json::Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_u64() {
        return (n > 0).then(|| usize::try_from(n).unwrap_or(usize::MAX));
    }
    if number.is_i64() {
        return None;
    }
    // Integers past u64::MAX arrive as f64.
    let f = number.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f >= u64::MAX as f64).then_some(usize::MAX)
}

fn validate_cantidad(value: &serde_json::Value) -> Result<(), ValidationError> {
    if positive_integer(value).is_none() {
        return Err(ValidationError::new("positive_integer")
            .with_message("cantidad must be a positive integer".into()));
    }
    Ok(())
}
