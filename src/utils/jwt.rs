// src/utils/jwt.rs

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Lifetime requested for the access token, in seconds. Google caps it at one hour.
pub const ASSERTION_LIFETIME: i64 = 3600;

/// Read-only scopes needed to open a spreadsheet by key.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

/// Claims of a service-account JWT-bearer assertion.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssertionClaims {
    /// Issuer - the service account e-mail.
    pub iss: String,
    /// Space separated OAuth scopes.
    pub scope: String,
    /// Audience - the token endpoint the assertion is sent to.
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs an RS256 assertion that the token endpoint exchanges for an access token.
///
/// Arguments:
/// * `client_email`: service account identity, used as issuer.
/// * `private_key_pem`: PKCS#8 key from the credentials bundle.
/// * `token_uri`: audience.
/// * `issued_at`: Unix timestamp.
pub fn sign_assertion(
    client_email: &str,
    private_key_pem: &str,
    token_uri: &str,
    issued_at: i64,
) -> Result<String, AppError> {
    let claims = AssertionClaims {
        iss: client_email.to_owned(),
        scope: SCOPES.join(" "),
        aud: token_uri.to_owned(),
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME,
    };

    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())?;

    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_service_account_key.pem");
    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_service_account_pub.pem");

    #[test]
    fn assertion_round_trips_with_public_key() {
        let now = chrono::Utc::now().timestamp();
        let token = sign_assertion(
            "quiz@example.iam.gserviceaccount.com",
            PRIVATE_KEY,
            "https://oauth2.googleapis.com/token",
            now,
        )
        .unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let data = decode::<AssertionClaims>(
            &token,
            &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.iss, "quiz@example.iam.gserviceaccount.com");
        assert_eq!(data.claims.exp - data.claims.iat, ASSERTION_LIFETIME);
        assert!(data.claims.scope.contains("spreadsheets.readonly"));
    }

    #[test]
    fn garbage_key_is_data_source_error() {
        let result = sign_assertion("a@b", "not a pem", "https://example.test/token", 0);
        assert!(matches!(result, Err(AppError::DataSource(_))));
    }
}
