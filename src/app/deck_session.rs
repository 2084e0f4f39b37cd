use crate::core::card_face::CardFaceLoader;
use crate::core::fetch_client::FetchClient;
use crate::core::orchestrator::{request_address, DeckFetcher, SessionSummary};
use crate::core::{Card, ConfigProvider, Result, Transport};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of one complete run.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Cards in arrival order.
    pub cards: Vec<Card>,
    /// Image size in bytes per card, aligned with `cards`. Empty when faces
    /// were not requested.
    pub faces: Vec<Option<usize>>,
    pub summary: SessionSummary,
    pub output_path: Option<String>,
}

#[derive(Serialize)]
struct DeckDocument<'a> {
    summary: &'a SessionSummary,
    cards: &'a [Card],
}

/// Addresses a session with this configuration would request.
pub fn planned_addresses<C: ConfigProvider>(config: &C) -> Vec<String> {
    (0..config.deck_size())
        .map(|index| request_address(config.endpoint(), index))
        .collect()
}

pub async fn run<C: ConfigProvider>(config: &C) -> Result<SessionOutcome> {
    let client = FetchClient::http(config.request_timeout())?;
    run_with_client(config, client).await
}

pub async fn run_with_client<C, T>(config: &C, client: FetchClient<T>) -> Result<SessionOutcome>
where
    C: ConfigProvider,
    T: Transport + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetcher = DeckFetcher::new(client.clone());
    let mut session = fetcher.fetch_all(config.deck_size(), config.endpoint(), move || {
        let _ = tx.send(());
    });

    // The sender lives inside the request tasks, so this ends once every
    // request has finished.
    while rx.recv().await.is_some() {
        let progress = session.progress();
        tracing::info!(
            "Deck updated: {} cards after {}/{} responses",
            session.deck().count(),
            progress.resolved,
            progress.requested
        );
    }

    let summary = session.wait().await;
    tracing::info!(
        "Fetch session finished: {} cards, {} rejected, {} undelivered",
        summary.appended,
        summary.rejected(),
        summary.undelivered()
    );

    let cards = session.deck().snapshot();

    let faces = if config.fetch_faces() {
        let loader = CardFaceLoader::new(Arc::clone(client.transport()));
        let mut faces = Vec::with_capacity(cards.len());
        for card in &cards {
            faces.push(loader.load(card).await.map(|bytes| bytes.len()));
        }
        faces
    } else {
        Vec::new()
    };

    let output_path = match config.output_path() {
        Some(path) => {
            write_deck(path, &cards, &summary)?;
            Some(path.to_string())
        }
        None => None,
    };

    Ok(SessionOutcome {
        cards,
        faces,
        summary,
        output_path,
    })
}

fn write_deck(path: &str, cards: &[Card], summary: &SessionSummary) -> Result<()> {
    let full_path = Path::new(path);
    if let Some(parent) = full_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(&DeckDocument { summary, cards })?;
    tracing::debug!("Writing deck ({} bytes) to {}", json.len(), path);
    std::fs::write(full_path, json)?;
    Ok(())
}
