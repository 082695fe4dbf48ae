//! Configuration module for environment variable parsing.
//!
//! The relay only needs two values: where to forward user IDs and which port
//! to listen on.

use std::env;
use tracing::warn;

/// Script endpoint used when `GAS_URL` is not set.
pub const DEFAULT_FORWARD_URL: &str = "https://script.google.com/macros/s/AKfycbzIZbg87UoPo8X9FGvaYmht0GNupn_ShOrdx7KaO6vWWxaj1Qrr11D2zPPQuJOp1RNp/exec";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target URL that receives forwarded user IDs
    pub forward_url: String,

    /// Whether `forward_url` came from the environment rather than the fallback
    pub forward_url_configured: bool,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let configured_url = env::var("GAS_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Config {
            forward_url_configured: configured_url.is_some(),
            forward_url: configured_url.unwrap_or_else(|| DEFAULT_FORWARD_URL.to_string()),
            port: parse_port("PORT", DEFAULT_PORT),
        }
    }

    /// Build a configuration pointing at an explicit forward target.
    pub fn with_forward_url(forward_url: impl Into<String>) -> Self {
        Config {
            forward_url: forward_url.into(),
            forward_url_configured: true,
            port: DEFAULT_PORT,
        }
    }
}

/// Parse a port number, falling back to `default` when unset or invalid.
fn parse_port(name: &str, default: u16) -> u16 {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid port, using default");
            default
        }
    }
}
