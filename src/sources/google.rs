// src/sources/google.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use super::{QuestionSource, Row, SourceStatus};
use crate::{
    config::{Config, SourceSettings},
    error::AppError,
    utils::jwt::sign_assertion,
};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields of a service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::DataSource(format!(
                "GOOGLE_CREDENTIALS is not a valid service-account key: {}",
                e
            ))
        })
    }

    fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    /// Omitted by the API when the range is empty.
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Reads question rows from a Google spreadsheet with a service account.
#[derive(Debug, Clone)]
pub struct GoogleSheetsSource {
    config: Config,
    client: Client,
}

impl GoogleSheetsSource {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl QuestionSource for GoogleSheetsSource {
    fn status(&self) -> SourceStatus {
        SourceStatus {
            google_credentials: self.config.google_credentials.is_some(),
            sheet_id: self.config.sheet_id.is_some(),
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, AppError> {
        let settings = self.config.require_source()?;
        let key = ServiceAccountKey::from_json(&settings.credentials_json)?;

        let session = SheetSession::open(&self.client, &key, &settings).await?;
        let range = match &settings.sheet_range {
            Some(range) => range.clone(),
            None => quote_sheet_title(&session.first_sheet_title().await?),
        };
        let rows = session.values(&range).await?;

        tracing::debug!("Fetched {} rows from range {}", rows.len(), range);
        Ok(rows)
    }
}

/// An authorized connection to one spreadsheet. Lives for a single fetch.
struct SheetSession<'a> {
    client: &'a Client,
    settings: &'a SourceSettings,
    access_token: String,
}

impl<'a> SheetSession<'a> {
    async fn open(
        client: &'a Client,
        key: &ServiceAccountKey,
        settings: &'a SourceSettings,
    ) -> Result<Self, AppError> {
        let now = chrono::Utc::now().timestamp();
        let assertion = sign_assertion(&key.client_email, &key.private_key, key.token_uri(), now)?;

        let response = client
            .post(key.token_uri())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response, "token exchange").await?.json().await?;

        Ok(Self {
            client,
            settings,
            access_token: token.access_token,
        })
    }

    /// Title of the first worksheet, the one read when no range is configured.
    async fn first_sheet_title(&self) -> Result<String, AppError> {
        let url = spreadsheet_url(self.settings, &[])?;
        let response = self
            .client
            .get(url)
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = ensure_success(response, "spreadsheet lookup").await?.json().await?;

        meta.sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| AppError::DataSource("spreadsheet has no worksheets".to_string()))
    }

    async fn values(&self, range: &str) -> Result<Vec<Row>, AppError> {
        let url = spreadsheet_url(self.settings, &["values", range])?;
        let response = self
            .client
            .get(url)
            .query(&[("majorDimension", "ROWS")])
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: ValueRange = ensure_success(response, "values fetch").await?.json().await?;

        Ok(fill_gaps(
            body.values
                .into_iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect(),
        ))
    }
}

/// `{api_base}/v4/spreadsheets/{id}/{extra...}` with every segment escaped.
fn spreadsheet_url(settings: &SourceSettings, extra: &[&str]) -> Result<Url, AppError> {
    let mut url = Url::parse(&settings.api_base).map_err(|e| {
        AppError::Configuration(format!("SHEETS_API_BASE is not a valid URL: {}", e))
    })?;
    url.path_segments_mut()
        .map_err(|_| AppError::Configuration("SHEETS_API_BASE cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", settings.sheet_id.as_str()])
        .extend(extra);
    Ok(url)
}

/// A bare title like `Q1` would read as a cell reference; quote it so the
/// whole worksheet is read.
fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

async fn ensure_success(response: Response, step: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::DataSource(format!(
        "{} failed with status {}: {}",
        step,
        status,
        body.trim()
    )))
}

fn cell_text(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The API drops trailing empty cells per row; pad every row to the widest one
/// so short rows read as blank cells instead of missing columns.
fn fill_gaps(mut rows: Vec<Row>) -> Vec<Row> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(api_base: &str) -> SourceSettings {
        SourceSettings {
            credentials_json: String::new(),
            sheet_id: "abc123".to_string(),
            sheet_range: None,
            api_base: api_base.to_string(),
        }
    }

    #[test]
    fn url_segments_are_escaped() {
        let url = spreadsheet_url(&settings("https://sheets.googleapis.com"), &["values", "Hoja 1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Hoja%201"
        );
    }

    #[test]
    fn sheet_titles_are_quoted_as_ranges() {
        assert_eq!(quote_sheet_title("Q1"), "'Q1'");
        assert_eq!(quote_sheet_title("Hoja 1"), "'Hoja 1'");
        assert_eq!(quote_sheet_title("It's"), "'It''s'");
    }

    #[test]
    fn invalid_api_base_is_configuration_error() {
        let result = spreadsheet_url(&settings("not a url"), &[]);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn rows_are_padded_to_widest() {
        let rows = fill_gaps(vec![
            vec!["id".into(), "q".into(), "a".into()],
            vec!["1".into()],
        ]);
        assert_eq!(rows[1], vec!["1".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn non_string_cells_become_text() {
        assert_eq!(cell_text(&json!(4)), "4");
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("x")), "x");
    }

    #[test]
    fn credentials_without_private_key_are_rejected() {
        let result = ServiceAccountKey::from_json(r#"{"client_email": "a@b"}"#);
        assert!(matches!(result, Err(AppError::DataSource(_))));
    }

    #[test]
    fn token_uri_defaults_to_google() {
        let key = ServiceAccountKey::from_json(r#"{"client_email": "a@b", "private_key": "k"}"#).unwrap();
        assert_eq!(key.token_uri(), DEFAULT_TOKEN_URI);
    }
}
