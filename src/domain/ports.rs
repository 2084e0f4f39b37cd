use crate::utils::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use url::Url;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn deck_size(&self) -> usize;
    fn request_timeout(&self) -> Option<Duration>;
    fn output_path(&self) -> Option<&str>;
    fn fetch_faces(&self) -> bool;
}

/// Performs one GET and yields the raw body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Bytes>;
}
