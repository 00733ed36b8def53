use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default: the service carries no external backing stores,
/// so it boots with zero configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Pacing between assessment phases, in milliseconds. Progress observers
    /// (the SSE endpoint) see phase transitions spaced by this interval.
    pub assessment_step_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            assessment_step_ms: std::env::var("ASSESSMENT_STEP_MS")
                .unwrap_or_else(|_| "150".to_string())
                .parse::<u64>()
                .context("ASSESSMENT_STEP_MS must be a non-negative integer")?,
        })
    }
}
