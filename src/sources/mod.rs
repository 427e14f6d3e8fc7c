// src/sources/mod.rs

//! Backing tabular sources. A request asks its source for rows once and owns
//! the result; no handle or token outlives `fetch_rows`.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;

pub mod google;
pub mod memory;

pub use google::GoogleSheetsSource;
pub use memory::StaticSource;

/// One sheet row, cells as displayed text.
pub type Row = Vec<String>;

/// Which connection inputs are present. Never carries the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    pub google_credentials: bool,
    pub sheet_id: bool,
}

impl SourceStatus {
    pub fn complete(&self) -> bool {
        self.google_credentials && self.sheet_id
    }
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    fn status(&self) -> SourceStatus;

    /// Fetches every row, header included, in sheet order.
    async fn fetch_rows(&self) -> Result<Vec<Row>, AppError>;
}
