use crate::core::ConfigProvider;
use crate::utils::error::{DeckError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    pub source: SourceConfig,
    pub deck: DeckSection,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSection {
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub fetch_faces: Option<bool>,
}

impl DeckConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DeckError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl ConfigProvider for DeckConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn deck_size(&self) -> usize {
        self.deck.size
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    fn fetch_faces(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.fetch_faces)
            .unwrap_or(false)
    }
}

impl Validate for DeckConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;
        validate_range("deck.size", self.deck.size, 1, 1000)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL: &str = r#"
[source]
endpoint = "https://api.example.com/card"
timeout_seconds = 15

[deck]
size = 22

[output]
path = "./deck.json"
fetch_faces = true
"#;

    #[test]
    fn test_parse_full_config() {
        let config = DeckConfig::from_str(FULL).unwrap();

        assert_eq!(config.endpoint(), "https://api.example.com/card");
        assert_eq!(config.deck_size(), 22);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.output_path(), Some("./deck.json"));
        assert!(config.fetch_faces());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = DeckConfig::from_str(
            r#"
[source]
endpoint = "http://localhost:3000/card"

[deck]
size = 3
"#,
        )
        .unwrap();

        assert!(config.request_timeout().is_none());
        assert!(config.output_path().is_none());
        assert!(!config.fetch_faces());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_section_is_toml_error() {
        let err = DeckConfig::from_str("[deck]\nsize = 3\n").unwrap_err();
        assert!(matches!(err, DeckError::TomlError(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = DeckConfig::from_str(
            r#"
[source]
endpoint = "ftp://api.example.com/card"

[deck]
size = 3
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = DeckConfig::from_str(
            r#"
[source]
endpoint = "https://api.example.com/card"

[deck]
size = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = DeckConfig::from_file(file.path()).unwrap();
        assert_eq!(config.deck_size(), 22);

        let err = DeckConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DeckError::ConfigError { .. }));
    }
}
