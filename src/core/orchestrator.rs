use crate::core::deck::Deck;
use crate::core::fetch_client::{FetchClient, HttpTransport};
use crate::domain::model::Card;
use crate::domain::ports::Transport;
use crate::utils::error::FetchError;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Address for one card: the base endpoint followed by `=<index>`.
pub fn request_address(base_endpoint: &str, index: usize) -> String {
    format!("{}={}", base_endpoint, index)
}

/// Turns one delivered body into a card.
pub fn parse_response(body: &[u8], index: usize) -> std::result::Result<Card, FetchError> {
    let json: Value = serde_json::from_slice(body).map_err(|e| FetchError::MalformedBody {
        reason: e.to_string(),
    })?;

    let Value::Object(mut results) = json else {
        return Err(FetchError::MalformedBody {
            reason: "top-level value is not an object".to_string(),
        });
    };

    let response = match results.remove("response") {
        Some(Value::Object(response)) => response,
        _ => return Err(FetchError::MissingResponseKey),
    };

    Card::from_record(&response)
        .map_err(|source| FetchError::CardConstructionFailed { index, source })
}

#[derive(Debug, Default)]
struct SessionTally {
    resolved: AtomicUsize,
    appended: AtomicUsize,
}

/// Counts for one fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionSummary {
    pub requested: usize,
    /// Responses that reached the completion hook, accepted or rejected.
    pub resolved: usize,
    pub appended: usize,
}

impl SessionSummary {
    pub fn rejected(&self) -> usize {
        self.resolved.saturating_sub(self.appended)
    }

    /// Requests that never delivered a body: invalid address, transport
    /// failure, aborted, or still pending.
    pub fn undelivered(&self) -> usize {
        self.requested.saturating_sub(self.resolved)
    }
}

/// Handle on a running fetch session.
///
/// The deck fills in arrival order while requests complete. Nothing here is
/// required for the session to progress; the tasks run detached.
pub struct FetchSession {
    deck: Deck,
    handles: Vec<JoinHandle<()>>,
    requested: usize,
    tally: Arc<SessionTally>,
}

impl FetchSession {
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn progress(&self) -> SessionSummary {
        // Load order mirrors the increment order in the completion callback.
        let appended = self.tally.appended.load(Ordering::SeqCst);
        let resolved = self.tally.resolved.load(Ordering::SeqCst);
        SessionSummary {
            requested: self.requested,
            resolved,
            appended,
        }
    }

    /// Cancels requests still in flight. Those slots stay undelivered.
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    /// Waits until every spawned request has finished one way or another.
    ///
    /// A request that never resolves keeps this pending; pair it with
    /// `tokio::time::timeout` and [`FetchSession::abort`] when that matters.
    ///
    /// Cancel-safe: handles are only released once their task has finished,
    /// so a timed-out wait can still be followed by `abort`.
    pub async fn wait(&mut self) -> SessionSummary {
        while let Some(handle) = self.handles.last_mut() {
            let joined = handle.await;
            self.handles.pop();
            if let Err(e) = joined {
                if !e.is_cancelled() {
                    tracing::error!("Fetch task failed: {}", e);
                }
            }
        }

        self.progress()
    }
}

/// Fetches a known number of cards by index and merges them into a deck.
pub struct DeckFetcher<T: Transport = HttpTransport> {
    client: FetchClient<T>,
}

impl<T: Transport + 'static> DeckFetcher<T> {
    pub fn new(client: FetchClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    /// Starts `count` concurrent requests against `base_endpoint=<index>`.
    ///
    /// Every delivered response is parsed, appended to the session's deck on
    /// success, and followed by exactly one call to `on_each_complete`. All of
    /// that runs under the client's completion barrier, so the hook observes
    /// a deck that is not being modified. Requests that are never delivered
    /// do not call the hook. Failed indices are logged and not retried.
    pub fn fetch_all<F>(
        &self,
        count: usize,
        base_endpoint: &str,
        on_each_complete: F,
    ) -> FetchSession
    where
        F: Fn() + Send + Sync + 'static,
    {
        tracing::info!("Fetching {} cards from {}", count, base_endpoint);

        let deck = Deck::new();
        let tally = Arc::new(SessionTally::default());
        let hook = Arc::new(on_each_complete);
        let mut handles = Vec::with_capacity(count);

        for index in 0..count {
            let address = request_address(base_endpoint, index);
            let deck = deck.clone();
            let tally = Arc::clone(&tally);
            let hook = Arc::clone(&hook);
            let source = address.clone();

            let handle = self.client.fetch(&address, move |body| {
                // resolved is bumped before appended so readers never see
                // more appends than resolutions.
                let outcome = parse_response(&body, index);
                tally.resolved.fetch_add(1, Ordering::SeqCst);

                match outcome {
                    Ok(card) => {
                        let title = card.title().to_string();
                        let len = deck.push(card);
                        tally.appended.fetch_add(1, Ordering::SeqCst);
                        tracing::info!("We made {} (deck has {} cards)", title, len);
                    }
                    Err(e) => {
                        tracing::warn!("Dropping card {} from {}: {}", index, source, e);
                    }
                }

                hook();
            });

            if let Some(handle) = handle {
                handles.push(handle);
            }
        }

        FetchSession {
            deck,
            handles,
            requested: count,
            tally,
        }
    }
}
