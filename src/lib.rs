pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::DeckConfig;

pub use crate::core::{
    deck::Deck,
    fetch_client::{FetchClient, HttpTransport},
    orchestrator::{DeckFetcher, FetchSession, SessionSummary},
};
pub use domain::model::{Card, CardError};
pub use utils::error::{DeckError, FetchError, Result};
