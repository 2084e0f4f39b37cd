use crate::domain::model::Card;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, arrival-ordered collection of cards.
///
/// Clones share the same storage. Appends take the write lock, readers take
/// the read lock, so a renderer may call [`Deck::count`] and [`Deck::get`]
/// while a fetch session is still populating it.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Arc<RwLock<Vec<Card>>>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.cards.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Card at `index` in arrival order.
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<Card> {
        self.cards.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Appends and returns the new length.
    pub(crate) fn push(&self, card: Card) -> usize {
        let mut cards = self.cards.write().unwrap_or_else(PoisonError::into_inner);
        cards.push(card);
        cards.len()
    }
}
