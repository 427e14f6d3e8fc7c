use std::sync::Arc;

use crate::{config::Config, quiz::RowParser, sources::QuestionSource};

pub type SharedSource = Arc<dyn QuestionSource>;

#[derive(Clone)]
pub struct AppState {
    pub source: SharedSource,
    pub config: Config,
}

impl AppState {
    pub fn new(source: impl QuestionSource + 'static, config: Config) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    pub fn parser(&self) -> RowParser {
        RowParser::new(self.config.require_answer_in_options)
    }
}
