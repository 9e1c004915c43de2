//! Location of the remote service.
//!
//! The base URL is required: it comes from `EXCELDB_API_URL` at build time and
//! is validated once at startup. There is no built-in default address.

use thiserror::Error;
use url::Url;

/// Build-time variable holding the service base URL
pub const API_URL_ENV: &str = "EXCELDB_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{} is not set", API_URL_ENV)]
    Missing,

    #[error("{} = \"{value}\" is not a valid URL: {reason}", API_URL_ENV)]
    Invalid { value: String, reason: String },

    #[error("{} = \"{value}\" must use http or https", API_URL_ENV)]
    UnsupportedScheme { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validates a raw base URL. Blank counts as missing.
    pub fn from_raw(raw: Option<&str>) -> Result<Self, ConfigError> {
        let value = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing)?;

        let parsed = Url::parse(value).map_err(|e| ConfigError::Invalid {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::UnsupportedScheme {
                value: value.to_string(),
            });
        }

        Ok(Self {
            base_url: value.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a service path starting with "/".
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_is_rejected() {
        assert_eq!(ApiConfig::from_raw(None), Err(ConfigError::Missing));
        assert_eq!(ApiConfig::from_raw(Some("  ")), Err(ConfigError::Missing));
    }

    #[test]
    fn test_valid_url_drops_trailing_slash() {
        let config = ApiConfig::from_raw(Some("https://excel-bd.example.org/")).unwrap();

        assert_eq!(config.base_url(), "https://excel-bd.example.org");
        assert_eq!(config.url("/tables"), "https://excel-bd.example.org/tables");
    }

    #[test]
    fn test_keeps_port_and_prefix() {
        let config = ApiConfig::from_raw(Some("http://10.0.0.5:8000/api")).unwrap();
        assert_eq!(config.url("/download"), "http://10.0.0.5:8000/api/download");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ApiConfig::from_raw(Some("not a url")),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ApiConfig::from_raw(Some("ftp://files.example.org")),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_error_names_the_variable() {
        assert_eq!(ConfigError::Missing.to_string(), "EXCELDB_API_URL is not set");
    }
}
