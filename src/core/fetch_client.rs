use crate::domain::ports::Transport;
use crate::utils::error::{DeckError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Bytes> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;

        // The body is handed on whatever the status; the parser decides.
        tracing::debug!("API response status for {}: {}", url, response.status());

        Ok(response.bytes().await?)
    }
}

/// Issues single GET requests and hands each body to a completion callback.
///
/// Every clone shares one completion barrier: callbacks from all in-flight
/// requests run one at a time, never interleaved. A request whose address
/// does not parse, or whose transport fails, never invokes its callback.
pub struct FetchClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    barrier: Arc<Mutex<()>>,
}

impl<T: Transport> Clone for FetchClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            barrier: Arc::clone(&self.barrier),
        }
    }
}

impl FetchClient<HttpTransport> {
    pub fn http(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(timeout)?))
    }
}

impl<T: Transport + 'static> FetchClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    pub fn with_shared_transport(transport: Arc<T>) -> Self {
        Self {
            transport,
            barrier: Arc::new(Mutex::new(())),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Starts a GET for `address` on the current Tokio runtime.
    ///
    /// Returns `None` without spawning anything when `address` is not a
    /// valid URI. Otherwise `on_complete` runs at most once, under the
    /// completion barrier, with the response body.
    pub fn fetch<F>(&self, address: &str, on_complete: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Bytes) + Send + 'static,
    {
        let url = match parse_address(address) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping request: {}", e);
                return None;
            }
        };

        let transport = Arc::clone(&self.transport);
        let barrier = Arc::clone(&self.barrier);

        Some(tokio::spawn(async move {
            let body = match transport.get(&url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Error during request to {}: {}", url, e);
                    return;
                }
            };

            let _guard = barrier.lock().unwrap_or_else(PoisonError::into_inner);
            on_complete(body);
        }))
    }
}

fn parse_address(address: &str) -> Result<Url> {
    Url::parse(address).map_err(|e| DeckError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}
