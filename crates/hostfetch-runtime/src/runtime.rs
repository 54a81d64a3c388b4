//! Tokio runtime management

use hostfetch_core::{BridgeConfig, BridgeError, BridgeResult};
use tokio::runtime::{Builder, Runtime};

/// Configuration for the async runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of worker threads (None = number of CPU cores)
    pub worker_threads: Option<usize>,
    /// Name prefix for worker threads
    pub thread_name: String,
    /// Maximum blocking threads
    pub max_blocking_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name: "hostfetch-worker".to_string(),
            max_blocking_threads: 64,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the worker count from the bridge configuration
    pub fn from_bridge_config(config: &BridgeConfig) -> Self {
        Self {
            worker_threads: config.worker_threads,
            ..Self::default()
        }
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Multi-threaded Tokio runtime driving async host clients
///
/// I/O and time drivers are always enabled; request deadlines rely on the
/// time driver.
pub struct AsyncRuntime {
    runtime: Runtime,
    config: RuntimeConfig,
}

impl AsyncRuntime {
    pub fn new(config: RuntimeConfig) -> BridgeResult<Self> {
        let mut builder = Builder::new_multi_thread();

        if let Some(threads) = config.worker_threads {
            builder.worker_threads(threads);
        }

        let runtime = builder
            .thread_name(&config.thread_name)
            .max_blocking_threads(config.max_blocking_threads)
            .enable_all()
            .build()
            .map_err(|e| BridgeError::Runtime(format!("failed to create runtime: {e}")))?;

        tracing::debug!(
            worker_threads = ?config.worker_threads,
            "async client runtime started"
        );

        Ok(Self { runtime, config })
    }

    pub fn with_defaults() -> BridgeResult<Self> {
        Self::new(RuntimeConfig::default())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Block the calling thread on a future
    ///
    /// Must not be called from inside this runtime's own worker threads.
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        self.runtime.block_on(future)
    }
}
