// src/handlers/quiz.rs

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use rand::{SeedableRng, rngs::StdRng};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        answer::ValidateAnswersRequest,
        question::{GetQuestionsRequest, QuestionsResponse},
    },
    quiz::{fetch_questions, sample_questions, validate},
    state::AppState,
};

/// Serves a random batch of questions.
///
/// * `cantidad` defaults to 5 and is capped at the number of valid questions.
/// * Each question's options are shuffled; the answer is never included.
/// * Returns 404 when the sheet holds no valid question.
pub async fn get_questions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload: GetQuestionsRequest = parse_body(&body)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let requested = payload
        .count()
        .ok_or_else(|| AppError::BadRequest("cantidad must be a positive integer".to_string()))?;

    let questions = fetch_questions(state.source.as_ref(), &state.parser()).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No valid questions were found in the spreadsheet".to_string(),
        ));
    }

    let mut rng = StdRng::from_entropy();
    let preguntas = sample_questions(&questions, requested, &mut rng);
    tracing::info!(
        "Serving {} of {} questions ({} requested)",
        preguntas.len(),
        questions.len(),
        requested
    );

    Ok(Json(QuestionsResponse { preguntas }))
}

/// Scores submitted answers against the current sheet contents.
///
/// Answers for unknown ids are reported per item and never fail the request.
pub async fn validate_answers(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload: ValidateAnswersRequest = parse_body(&body)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let questions = fetch_questions(state.source.as_ref(), &state.parser()).await?;
    let report = validate(&questions, &payload.respuestas);
    tracing::info!(
        "Validated {} answers: {} correct, {} incorrect",
        report.total_questions,
        report.correct_count,
        report.incorrect_count
    );

    Ok(Json(report))
}

/// An empty body reads as `{}`; anything else must be valid JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_uses_defaults() {
        let req: GetQuestionsRequest = parse_body(b"  \n").unwrap();
        assert_eq!(req.count(), Some(5));
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let result = parse_body::<ValidateAnswersRequest>(b"{not json");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
