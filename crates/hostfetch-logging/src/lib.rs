//! hostfetch-logging - Tracing to FFI log callback forwarding
//!
//! This crate provides:
//! - [`FfiLoggingLayer`] tracing layer that forwards bridge logs to the embedder
//! - [`LogCallback`] type for the FFI log callback function
//! - Dynamic log level filtering through [`ReloadHandle`]

mod callback;
mod layer;
mod reload;

pub use callback::{LogCallback, LogCallbackManager};
pub use hostfetch_core::LogLevel;
pub use layer::{FfiLoggingLayer, init_logging, init_logging_with_level};
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FfiLoggingLayer, LogCallback, LogCallbackManager, LogLevel, init_logging};
}
