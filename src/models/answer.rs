// src/models/answer.rs

use serde::{Deserialize, Deserializer, Serialize, de};
use validator::Validate;

pub const NOT_FOUND_MESSAGE: &str = "Pregunta no encontrada";

/// One answer as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    #[serde(rename = "id", default, deserialize_with = "lenient_id")]
    pub question_id: String,
    #[serde(rename = "respuesta", default)]
    pub answer_code: String,
}

/// DTO for submitting answers to be scored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ValidateAnswersRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "No answers were submitted"))]
    pub respuestas: Vec<SubmittedAnswer>,
}

/// Outcome for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "AnswerEntry")]
pub struct AnswerResult {
    pub question_id: String,
    pub found: bool,
    pub correct: bool,
    /// Normalized (trimmed, uppercased) submitted letter.
    pub submitted_code: String,
    /// `None` when the question was not found.
    pub correct_code: Option<String>,
    pub points: u32,
}

/// Wire shape of an `AnswerResult`; not-found entries carry an error instead
/// of the comparison fields.
#[derive(Serialize)]
#[serde(untagged)]
enum AnswerEntry {
    Scored {
        id: String,
        correcta: bool,
        respuesta_enviada: String,
        respuesta_correcta: String,
        puntaje: u32,
    },
    NotFound {
        id: String,
        error: &'static str,
        puntaje: u32,
    },
}

impl From<AnswerResult> for AnswerEntry {
    fn from(result: AnswerResult) -> Self {
        match result.correct_code {
            Some(correct_code) if result.found => AnswerEntry::Scored {
                id: result.question_id,
                correcta: result.correct,
                respuesta_enviada: result.submitted_code,
                respuesta_correcta: correct_code,
                puntaje: result.points,
            },
            _ => AnswerEntry::NotFound {
                id: result.question_id,
                error: NOT_FOUND_MESSAGE,
                puntaje: result.points,
            },
        }
    }
}

/// Per-answer results plus the aggregate score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    #[serde(rename = "resultados")]
    pub results: Vec<AnswerResult>,
    #[serde(rename = "puntaje_total")]
    pub total_score: u32,
    #[serde(rename = "total_preguntas")]
    pub total_questions: usize,
    #[serde(rename = "correctas")]
    pub correct_count: usize,
    #[serde(rename = "incorrectas")]
    pub incorrect_count: usize,
}

/// Accepts string or numeric ids; numbers are compared by their decimal text.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a string or number id",
        )),
    }
}
