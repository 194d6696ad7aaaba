//! Environment-based configuration.
//!
//! The service is configured entirely through environment variables:
//! the chat-platform token (required), the per-request timeout and the
//! keep-alive port (both optional with defaults).

use std::env;
use std::time::Duration;

use anyhow::{Result, bail};

/// Environment variable carrying the chat-platform token.
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Optional request timeout override, in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT";
/// Optional keep-alive port override.
pub const PORT_VAR: &str = "PORT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the long-running service.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Chat-platform authentication token.
    pub bot_token: String,
    /// Per-request timeout for the weather endpoints.
    pub request_timeout: Duration,
    /// Port of the keep-alive HTTP endpoint.
    pub port: u16,
}

impl Settings {
    /// Load settings from the environment, failing fast when the chat
    /// token is absent or empty.
    pub fn from_env() -> Result<Self> {
        Self::build(
            env::var(BOT_TOKEN_VAR).ok(),
            env::var(REQUEST_TIMEOUT_VAR).ok(),
            env::var(PORT_VAR).ok(),
        )
    }

    fn build(token: Option<String>, timeout: Option<String>, port: Option<String>) -> Result<Self> {
        let bot_token = token.unwrap_or_default();
        if bot_token.trim().is_empty() {
            bail!("chat token is missing or empty; set the {BOT_TOKEN_VAR} environment variable");
        }

        Ok(Self {
            bot_token,
            request_timeout: parse_timeout(timeout.as_deref()),
            port: port.and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Request timeout from the environment, defaulting to 10 seconds when
/// unset or unparseable.
pub fn request_timeout_from_env() -> Duration {
    parse_timeout(env::var(REQUEST_TIMEOUT_VAR).ok().as_deref())
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_fast_without_token() {
        let err = Settings::build(None, None, None).unwrap_err();
        assert!(err.to_string().contains(BOT_TOKEN_VAR));

        let err = Settings::build(Some("   ".to_string()), None, None).unwrap_err();
        assert!(err.to_string().contains("missing or empty"));
    }

    #[test]
    fn build_applies_defaults() {
        let settings = Settings::build(Some("token".to_string()), None, None).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn build_honours_overrides() {
        let settings = Settings::build(
            Some("token".to_string()),
            Some("5".to_string()),
            Some("9090".to_string()),
        )
        .unwrap();

        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.port, 9090);
    }

    #[test]
    fn unparseable_overrides_fall_back_to_defaults() {
        assert_eq!(parse_timeout(Some("soon")), Duration::from_secs(10));
        assert_eq!(parse_timeout(Some("30")), Duration::from_secs(30));
    }
}
