use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "deck-fetch")]
#[command(about = "Fetches a deck of cards, one request per card")]
pub struct CliConfig {
    /// Base address; each request appends `=<index>`
    #[arg(long, default_value = "https://api.example.com/card")]
    pub endpoint: String,

    #[arg(long, default_value = "23")]
    pub deck_size: usize,

    /// Per-request timeout; requests wait indefinitely when unset
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Write the fetched deck as JSON to this file
    #[arg(long)]
    pub output: Option<String>,

    /// Also download each card's image
    #[arg(long)]
    pub faces: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn deck_size(&self) -> usize {
        self.deck_size
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn fetch_faces(&self) -> bool {
        self.faces
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_range("deck_size", self.deck_size, 1, 1000)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["deck-fetch"]);

        assert_eq!(config.endpoint(), "https://api.example.com/card");
        assert_eq!(config.deck_size(), 23);
        assert!(config.request_timeout().is_none());
        assert!(config.output_path().is_none());
        assert!(!config.fetch_faces());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "deck-fetch",
            "--endpoint",
            "http://localhost:8080/card",
            "--deck-size",
            "5",
            "--timeout-seconds",
            "10",
            "--output",
            "deck.json",
            "--faces",
        ]);

        assert_eq!(config.deck_size(), 5);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.output_path(), Some("deck.json"));
        assert!(config.fetch_faces());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let config = CliConfig::parse_from(["deck-fetch", "--deck-size", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["deck-fetch", "--endpoint", "card"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["deck-fetch", "--timeout-seconds", "0"]);
        assert!(config.validate().is_err());
    }
}
