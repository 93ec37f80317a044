use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// `apps/api/assets/arial.ttf`, independent of the working directory.
const DEFAULT_FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/arial.ttf");

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// TrueType face embedded in every document.
    pub font_path: PathBuf,
    /// Optional JSON patch over the built-in stylesheets.
    pub stylesheet_path: Option<PathBuf>,
    pub artifact_dir: PathBuf,
    pub artifact_max_age_secs: u64,
    pub artifact_sweep_interval_secs: u64,
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            font_path: std::env::var("FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONT_PATH)),
            stylesheet_path: std::env::var("STYLESHEET_PATH").ok().map(PathBuf::from),
            artifact_dir: std::env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            artifact_max_age_secs: parse_env("ARTIFACT_MAX_AGE_SECS", 600)?,
            artifact_sweep_interval_secs: parse_env("ARTIFACT_SWEEP_INTERVAL_SECS", 300)?,
            rate_limit_per_minute: parse_env("RATE_LIMIT_PER_MINUTE", 5)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<u16>("PORT", "9090").unwrap(), 9090);
        assert_eq!(parse_value::<u32>("RATE_LIMIT_PER_MINUTE", " 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_value_error_names_the_variable() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_default_font_lives_in_the_crate_assets() {
        let path = PathBuf::from(DEFAULT_FONT_PATH);
        assert!(path.is_absolute());
        assert!(path.ends_with("apps/api/assets/arial.ttf"));
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u64 = parse_env("CVESPRESSO_TEST_UNSET_VARIABLE", 600).unwrap();
        assert_eq!(value, 600);
    }
}
