// src/quiz/parser.rs

use crate::models::question::{OPTION_CODES, Question, QuestionOption};

/// Columns A-G: id, question text, four options, answer letter.
pub const MIN_FIELDS: usize = 7;

pub const MIN_OPTIONS: usize = 2;

const ID_COLUMN: usize = 0;
const TEXT_COLUMN: usize = 1;
const FIRST_OPTION_COLUMN: usize = 2;
const ANSWER_COLUMN: usize = 6;

/// Read-only view over a row that answers `""` past its last cell.
struct RowFields<'a> {
    cells: &'a [String],
}

impl<'a> RowFields<'a> {
    fn new(cells: &'a [String]) -> Self {
        Self { cells }
    }

    fn width(&self) -> usize {
        self.cells.len()
    }

    fn get(&self, column: usize) -> &'a str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Turns spreadsheet rows into questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowParser {
    /// When set, a row whose answer letter names no surviving option is
    /// rejected instead of being served with an unreachable answer.
    pub require_answer_in_options: bool,
}

impl RowParser {
    pub fn new(require_answer_in_options: bool) -> Self {
        Self {
            require_answer_in_options,
        }
    }

    /// Parses one row. `row_position` is the 1-based row number in the sheet
    /// and only feeds the synthesized id when column A is empty.
    pub fn parse(&self, row: &[String], row_position: usize) -> Option<Question> {
        let fields = RowFields::new(row);
        if fields.width() < MIN_FIELDS {
            return None;
        }

        let text = fields.get(TEXT_COLUMN);
        if text.is_empty() {
            return None;
        }

        let options: Vec<QuestionOption> = OPTION_CODES
            .iter()
            .enumerate()
            .filter_map(|(offset, code)| {
                let option_text = fields.get(FIRST_OPTION_COLUMN + offset);
                (!option_text.is_empty()).then(|| QuestionOption {
                    code: (*code).to_string(),
                    text: option_text.to_string(),
                })
            })
            .collect();

        if options.len() < MIN_OPTIONS {
            return None;
        }

        let correct_answer = normalize_code(fields.get(ANSWER_COLUMN));

        if self.require_answer_in_options && !options.iter().any(|o| o.code == correct_answer) {
            tracing::debug!(
                "Row {} rejected: answer '{}' matches no option",
                row_position,
                correct_answer
            );
            return None;
        }

        let id = match fields.get(ID_COLUMN) {
            "" => synthesize_id(row_position),
            id => id.to_string(),
        };

        Some(Question {
            id,
            text: text.to_string(),
            options,
            correct_answer,
        })
    }
}

/// Parses a row with the default (lenient) rules.
pub fn parse_row(row: &[String], row_position: usize) -> Option<Question> {
    RowParser::default().parse(row, row_position)
}

/// Id used for rows with an empty column A. Stable while row order is.
pub fn synthesize_id(row_position: usize) -> String {
    format!("pregunta_{}", row_position)
}

/// Trim + uppercase, applied to stored and submitted answer letters alike.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
