use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated short code identifying a shortened URL.
///
/// Short codes are 1-64 characters long and contain only URL-safe
/// characters: ASCII alphanumerics, hyphens and underscores.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 64;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that only draw from the URL-safe alphabet).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Builds the public short URL for this code under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("a").is_ok());
        assert!(ShortCode::new("V1StGX").is_ok());
        assert!(ShortCode::new("Abc-123_xyz").is_ok());
        assert!(ShortCode::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(65)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("abc!def").is_err());
        assert!(ShortCode::new("héllo").is_err());
    }

    #[test]
    fn display() {
        let code = ShortCode::new("my-code").unwrap();
        assert_eq!(code.to_string(), "my-code");
    }

    #[test]
    fn to_url_trims_trailing_slash() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("https://qr.link"), "https://qr.link/abc123");
        assert_eq!(code.to_url("https://qr.link/"), "https://qr.link/abc123");
        assert_eq!(
            code.to_url("http://localhost:3000/qrcode"),
            "http://localhost:3000/qrcode/abc123"
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: ShortCode = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.as_str(), "abc123");

        assert!(serde_json::from_str::<ShortCode>("\"\"").is_err());
        assert!(serde_json::from_str::<ShortCode>("\"a/b\"").is_err());
    }
}
