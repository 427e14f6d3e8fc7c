// src/sources/memory.rs

use async_trait::async_trait;

use super::{QuestionSource, Row, SourceStatus};
use crate::error::AppError;

/// Fixed rows held in memory. Used by tests and local demos.
#[derive(Debug, Clone)]
pub struct StaticSource {
    rows: Result<Vec<Row>, String>,
}

impl StaticSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: Ok(rows) }
    }

    /// Convenience for literal tables.
    pub fn from_table(table: &[&[&str]]) -> Self {
        Self::new(
            table
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    /// A source whose every fetch fails with `DataSourceError`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rows: Err(message.into()),
        }
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn status(&self) -> SourceStatus {
        SourceStatus {
            google_credentials: true,
            sheet_id: true,
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, AppError> {
        self.rows.clone().map_err(AppError::DataSource)
    }
}
