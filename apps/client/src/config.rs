use std::path::PathBuf;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the résumé service, without the `/api` suffix.
    pub backend_url: String,
    /// Where exported résumés are written.
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: normalize_base_url(&require_env("BACKEND_URL")?)?,
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("BACKEND_URL must start with http:// or https://, got '{raw}'");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:8001/").unwrap(),
            "http://localhost:8001"
        );
        assert_eq!(
            normalize_base_url(" https://resume.example.com// ").unwrap(),
            "https://resume.example.com"
        );
    }

    #[test]
    fn test_normalize_rejects_missing_scheme() {
        assert!(normalize_base_url("localhost:8001").is_err());
    }
}
