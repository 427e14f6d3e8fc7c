// src/quiz/validator.rs

use std::collections::HashMap;

use super::parser::normalize_code;
use crate::models::{
    answer::{AnswerResult, SubmittedAnswer, ValidationReport},
    question::Question,
};

/// Scores `submitted` against `questions`, one result per answer in input order.
///
/// Unknown ids produce a not-found entry worth zero and count as incorrect.
/// If two questions share an id the later one wins.
pub fn validate(questions: &[Question], submitted: &[SubmittedAnswer]) -> ValidationReport {
    let by_id: HashMap<&str, &Question> = questions.iter().map(|q| (q.id.as_str(), q)).collect();

    let mut report = ValidationReport {
        total_questions: submitted.len(),
        ..ValidationReport::default()
    };

    for answer in submitted {
        let submitted_code = normalize_code(&answer.answer_code);

        let result = match by_id.get(answer.question_id.as_str()) {
            Some(question) => {
                let correct = submitted_code == question.correct_answer;
                AnswerResult {
                    question_id: answer.question_id.clone(),
                    found: true,
                    correct,
                    submitted_code,
                    correct_code: Some(question.correct_answer.clone()),
                    points: u32::from(correct),
                }
            }
            None => AnswerResult {
                question_id: answer.question_id.clone(),
                found: false,
                correct: false,
                submitted_code,
                correct_code: None,
                points: 0,
            },
        };

        report.total_score += result.points;
        if result.correct {
            report.correct_count += 1;
        } else {
            report.incorrect_count += 1;
        }
        report.results.push(result);
    }

    report
}
