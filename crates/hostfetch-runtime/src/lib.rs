//! hostfetch-runtime - Tokio runtime integration
//!
//! This crate provides:
//! - [`AsyncRuntime`] for managing the Tokio runtime
//! - [`AsyncHttpClient`] for host clients written against async I/O
//! - [`BlockingClient`] which exposes an async client as a blocking [`hostfetch_core::HttpClient`]

mod client;
mod runtime;

pub use client::{AsyncHttpClient, BlockingClient};
pub use runtime::{AsyncRuntime, RuntimeConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AsyncHttpClient, AsyncRuntime, BlockingClient, RuntimeConfig};
}
