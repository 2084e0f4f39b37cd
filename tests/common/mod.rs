#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use deck_fetch::core::Transport;
use deck_fetch::{DeckError, Result};
use std::collections::HashMap;
use url::Url;

pub enum Reply {
    Body(Bytes),
    Fail,
    Hang,
}

/// In-memory transport answering from a fixed table. Unknown addresses fail.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, address: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(address.into(), reply);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<Bytes> {
        tokio::task::yield_now().await;
        match self.replies.get(url.as_str()) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Hang) => std::future::pending::<Result<Bytes>>().await,
            Some(Reply::Fail) | None => Err(DeckError::ConfigError {
                message: format!("connection reset by {}", url),
            }),
        }
    }
}

pub fn card_json(title: &str, image: &str) -> serde_json::Value {
    serde_json::json!({
        "response": {
            "title": title,
            "image": image,
            "description": format!("The card called {}", title),
        }
    })
}

pub fn card_body(title: &str) -> Bytes {
    Bytes::from(card_json(title, &format!("https://cards.example.com/{}.png", title)).to_string())
}
