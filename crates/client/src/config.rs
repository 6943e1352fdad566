//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default backend API base URL.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL; request paths are joined onto it.
    pub api_base_url: String,

    /// Directory holding persisted session state.
    pub state_dir: PathBuf,

    /// Fixed per-request timeout.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            env::var("LABODC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_base_url = validate_base_url(&api_base_url)?;

        let state_dir = env::var("LABODC_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./.labodc"));

        let timeout_secs: u64 = env::var("LABODC_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("LABODC_REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            api_base_url,
            state_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Validate the API base URL and strip any trailing slash.
fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw).context("LABODC_API_URL is not a valid URL")?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => anyhow::bail!("unsupported API URL scheme: {scheme}"),
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        assert_eq!(
            validate_base_url("https://api.labodc.example/api/").unwrap(),
            "https://api.labodc.example/api"
        );
    }

    #[test]
    fn base_url_rejects_non_http_schemes() {
        assert!(validate_base_url("ftp://api.labodc.example").is_err());
        assert!(validate_base_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(validate_base_url("not a url").is_err());
    }
}
