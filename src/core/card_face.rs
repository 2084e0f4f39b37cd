use crate::core::fetch_client::HttpTransport;
use crate::domain::model::Card;
use crate::domain::ports::Transport;
use bytes::Bytes;
use std::sync::Arc;

/// Loads the raw image bytes behind a card's image URI.
///
/// Decoding is left to whoever renders the card. A failed or empty fetch
/// yields `None` and the card is shown without a face.
pub struct CardFaceLoader<T: Transport = HttpTransport> {
    transport: Arc<T>,
}

impl<T: Transport> CardFaceLoader<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn load(&self, card: &Card) -> Option<Bytes> {
        match self.transport.get(card.image()).await {
            Ok(bytes) if bytes.is_empty() => {
                tracing::warn!("Empty image body for {} at {}", card.title(), card.image());
                None
            }
            Ok(bytes) => {
                tracing::debug!("Loaded {} byte face for {}", bytes.len(), card.title());
                Some(bytes)
            }
            Err(e) => {
                tracing::warn!("Error creating image from {}: {}", card.image(), e);
                None
            }
        }
    }
}
