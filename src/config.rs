// src/config.rs

use std::env;
use std::sync::OnceLock;

use dotenvy::dotenv;
use regex::Regex;

use crate::error::AppError;

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

const CREDENTIALS_VAR: &str = "GOOGLE_CREDENTIALS";
const SHEET_ID_VAR: &str = "SHEET_ID";

#[derive(Debug, Clone)]
pub struct Config {
    /// Raw service-account JSON bundle. Checked when a connection is made.
    pub google_credentials: Option<String>,
    pub sheet_id: Option<String>,
    /// A1 range or worksheet title. `None` reads the first worksheet.
    pub sheet_range: Option<String>,
    pub sheets_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Reject rows whose answer letter does not name a surviving option.
    pub require_answer_in_options: bool,
}

/// Connection inputs once both required variables are known to be present.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub credentials_json: String,
    pub sheet_id: String,
    pub sheet_range: Option<String>,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let sheets_api_base = non_empty_var("SHEETS_API_BASE")
            .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let require_answer_in_options = env::var("REQUIRE_ANSWER_IN_OPTIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            google_credentials: non_empty_var(CREDENTIALS_VAR),
            sheet_id: non_empty_var(SHEET_ID_VAR),
            sheet_range: non_empty_var("SHEET_RANGE"),
            sheets_api_base,
            port,
            rust_log,
            log_dir,
            cors_origins,
            require_answer_in_options,
        }
    }

    /// Checks the connection inputs and hands them out as one bundle.
    pub fn require_source(&self) -> Result<SourceSettings, AppError> {
        let credentials_json = self
            .google_credentials
            .clone()
            .ok_or_else(|| AppError::Configuration(format!("{} is not configured", CREDENTIALS_VAR)))?;

        let sheet_id = self
            .sheet_id
            .clone()
            .ok_or_else(|| AppError::Configuration(format!("{} is not configured", SHEET_ID_VAR)))?;

        if !sheet_id_pattern().is_match(&sheet_id) {
            return Err(AppError::Configuration(format!(
                "{} does not look like a spreadsheet key",
                SHEET_ID_VAR
            )));
        }

        Ok(SourceSettings {
            credentials_json,
            sheet_id,
            sheet_range: self.sheet_range.clone(),
            api_base: self.sheets_api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_credentials: None,
            sheet_id: None,
            sheet_range: None,
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            port: 5000,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: Vec::new(),
            require_answer_in_options: false,
        }
    }
}

fn sheet_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex"))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            google_credentials: Some("{}".to_string()),
            sheet_id: Some("1AbC_def-2".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn missing_credentials_is_configuration_error() {
        let config = Config {
            google_credentials: None,
            ..configured()
        };
        match config.require_source() {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("GOOGLE_CREDENTIALS")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_sheet_id_is_configuration_error() {
        let config = Config {
            sheet_id: None,
            ..configured()
        };
        match config.require_source() {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("SHEET_ID")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn malformed_sheet_id_is_rejected() {
        let config = Config {
            sheet_id: Some("../etc/passwd".to_string()),
            ..configured()
        };
        assert!(matches!(config.require_source(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn api_base_loses_trailing_slash() {
        let config = Config {
            sheets_api_base: "http://127.0.0.1:9999/".to_string(),
            ..configured()
        };
        let settings = config.require_source().unwrap();
        assert_eq!(settings.api_base, "http://127.0.0.1:9999");
        assert_eq!(settings.sheet_id, "1AbC_def-2");
    }

    #[test]
    fn origins_and_flags_parse() {
        assert!(parse_origins("*").is_empty());
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("off"));
    }
}
