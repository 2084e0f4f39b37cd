use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Untyped key-value mapping as it arrives under the `"response"` key.
pub type CardRecord = Map<String, Value>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("{0} not found")]
    MissingField(&'static str),

    #[error("title is empty")]
    EmptyTitle,

    #[error("image '{value}' is not a valid URI: {reason}")]
    InvalidUri { value: String, reason: String },
}

/// One fetched card. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    title: String,
    image: Url,
    description: String,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        image: Url,
        description: impl Into<String>,
    ) -> std::result::Result<Self, CardError> {
        let title = title.into();
        if title.is_empty() {
            return Err(CardError::EmptyTitle);
        }

        Ok(Self {
            title,
            image,
            description: description.into(),
        })
    }

    /// Builds a card from a raw record. Fields are checked in the order
    /// title, image, description and the first failure is reported.
    pub fn from_record(record: &CardRecord) -> std::result::Result<Self, CardError> {
        let title = string_field(record, "title")?;
        let image_str = string_field(record, "image")?;
        let image = Url::parse(image_str).map_err(|e| CardError::InvalidUri {
            value: image_str.to_string(),
            reason: e.to_string(),
        })?;
        let description = string_field(record, "description")?;

        Self::new(title, image, description)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &Url {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn string_field<'a>(
    record: &'a CardRecord,
    name: &'static str,
) -> std::result::Result<&'a str, CardError> {
    record
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or(CardError::MissingField(name))
}
