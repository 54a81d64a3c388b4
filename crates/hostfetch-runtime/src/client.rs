//! Async host clients behind the blocking bridge interface

use crate::runtime::AsyncRuntime;
use async_trait::async_trait;
use hostfetch_core::{ClientError, HostRequest, HostResponse, HttpClient};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client written against async I/O
#[async_trait]
pub trait AsyncHttpClient: Send + Sync {
    async fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError>;
}

/// Adapter running an [`AsyncHttpClient`] on an [`AsyncRuntime`]
///
/// The request's connect and read timeouts are summed into one deadline for
/// the whole fetch; a zero total means no deadline.
pub struct BlockingClient<C> {
    client: C,
    runtime: Arc<AsyncRuntime>,
}

impl<C: AsyncHttpClient> BlockingClient<C> {
    pub fn new(client: C, runtime: Arc<AsyncRuntime>) -> Self {
        Self { client, runtime }
    }

    pub fn runtime(&self) -> &Arc<AsyncRuntime> {
        &self.runtime
    }

    fn deadline(request: &HostRequest<'_>) -> Option<Duration> {
        let total = request.connect_timeout + request.read_timeout;
        (!total.is_zero()).then_some(total)
    }
}

impl<C: AsyncHttpClient> HttpClient for BlockingClient<C> {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        let deadline = Self::deadline(&request);
        let fetch = self.client.fetch(request);

        match deadline {
            None => self.runtime.block_on(fetch),
            Some(limit) => self.runtime.block_on(async move {
                match tokio::time::timeout(limit, fetch).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::debug!(?limit, "async fetch hit its deadline");
                        Err(ClientError::timeout("deadline exceeded"))
                    }
                }
            }),
        }
    }
}
