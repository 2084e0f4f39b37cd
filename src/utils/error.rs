use crate::domain::model::CardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
}

impl DeckError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DeckError::TomlError(_)
                | DeckError::ConfigError { .. }
                | DeckError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeckError::ApiError(_) => "Could not reach the card server".to_string(),
            DeckError::IoError(e) => format!("Could not read or write a file: {}", e),
            DeckError::SerializationError(_) => "Could not encode the deck as JSON".to_string(),
            DeckError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            DeckError::ConfigError { message } => format!("Configuration problem: {}", message),
            DeckError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
            DeckError::InvalidAddress { address, .. } => {
                format!("'{}' is not a usable address", address)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeckError::ApiError(_) => "Check the network connection and the endpoint address",
            DeckError::IoError(_) => "Check that the output directory exists and is writable",
            DeckError::SerializationError(_) => "Report this as a bug",
            DeckError::TomlError(_) => "Fix the syntax of the configuration file",
            DeckError::ConfigError { .. }
            | DeckError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the configuration file"
            }
            DeckError::InvalidAddress { .. } => "Use an absolute http(s) URL as the endpoint",
        }
    }
}

/// Why a single delivered response did not become a card.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("response body is not a JSON object: {reason}")]
    MalformedBody { reason: String },

    #[error("response body has no \"response\" object")]
    MissingResponseKey,

    #[error("could not make card {index}: {source}")]
    CardConstructionFailed {
        index: usize,
        #[source]
        source: CardError,
    },
}

pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        let err = DeckError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: "card".to_string(),
            reason: "Invalid URL format".to_string(),
        };
        assert!(err.is_config_error());
        assert!(err.user_friendly_message().contains("endpoint"));

        let err = DeckError::InvalidAddress {
            address: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_card_construction_failure_names_index_and_field() {
        let err = FetchError::CardConstructionFailed {
            index: 7,
            source: CardError::MissingField("description"),
        };
        let message = err.to_string();
        assert!(message.contains('7'));
        assert!(message.contains("description"));
    }
}
