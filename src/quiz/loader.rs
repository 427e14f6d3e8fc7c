// src/quiz/loader.rs

use super::parser::RowParser;
use crate::{
    error::AppError,
    models::question::Question,
    sources::{QuestionSource, Row},
};

/// Parses every row after the first, numbering rows from 1 with the header
/// counted, and keeps the ones that form a question.
pub fn load_questions_with(parser: &RowParser, rows: &[Row]) -> Vec<Question> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| parser.parse(row, index + 1))
        .collect()
}

pub fn load_questions(rows: &[Row]) -> Vec<Question> {
    load_questions_with(&RowParser::default(), rows)
}

/// Fetches the current rows from `source` and parses them.
///
/// An empty result is not an error here; callers decide what zero questions means.
pub async fn fetch_questions(
    source: &dyn QuestionSource,
    parser: &RowParser,
) -> Result<Vec<Question>, AppError> {
    let rows = source.fetch_rows().await?;
    let questions = load_questions_with(parser, &rows);
    tracing::info!(
        "Loaded {} questions from {} rows",
        questions.len(),
        rows.len()
    );
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;

    fn table() -> Vec<Row> {
        [
            vec!["ID", "Pregunta", "A", "B", "C", "D", "Correcta"],
            vec!["1", "2+2?", "3", "4", "5", "6", "B"],
            vec!["", "Capital of France?", "Paris", "Rome", "", "", "a"],
            vec!["3", "", "x", "y", "", "", "A"],
            vec!["4", "Too few", "x", "", "", "", "A"],
            vec!["5", "Last", "yes", "no", "", "", "A"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn header_is_skipped_and_invalid_rows_dropped() {
        let questions = load_questions(&table());
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "pregunta_3", "5"]);
    }

    #[test]
    fn first_row_is_skipped_even_if_it_is_a_question() {
        let mut rows = table();
        rows.remove(0);
        let questions = load_questions(&rows);
        assert!(questions.iter().all(|q| q.id != "1"));
    }

    #[test]
    fn empty_sheet_loads_nothing() {
        assert!(load_questions(&[]).is_empty());
    }

    #[tokio::test]
    async fn fetch_propagates_source_failure() {
        let source = StaticSource::failing("sheet unreachable");
        let result = fetch_questions(&source, &RowParser::default()).await;
        assert!(matches!(result, Err(AppError::DataSource(msg)) if msg == "sheet unreachable"));
    }

    #[tokio::test]
    async fn fetch_parses_rows() {
        let source = StaticSource::new(table());
        let questions = fetch_questions(&source, &RowParser::default()).await.unwrap();
        assert_eq!(questions.len(), 3);
    }
}
