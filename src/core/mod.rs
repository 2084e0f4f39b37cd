pub mod card_face;
pub mod deck;
pub mod fetch_client;
pub mod orchestrator;

pub use crate::domain::model::{Card, CardError};
pub use crate::domain::ports::{ConfigProvider, Transport};
pub use crate::utils::error::Result;
