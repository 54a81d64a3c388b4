//! C ABI exported functions
//!
//! These are the entry points the native runtime and the embedder call.

use crate::buffer::ByteBuffer;
use crate::panic_guard::{catch_panic, install_panic_hook};
use crate::registry::BridgeRegistry;
use hostfetch_core::{BridgeConfig, BridgeResult, LogLevel};
use hostfetch_logging::{LogCallback, LogCallbackManager, ReloadHandle};
use std::panic::AssertUnwindSafe;

/// Fetch callback handed to native runtimes
///
/// Looks up the bridge registered under `handle` and runs one fetch. The
/// returned buffer is owned by the caller; a zero-length buffer means the
/// bridge could not produce a response at all.
///
/// # Safety
/// - `request` must be a buffer allocated by the native runtime the bridge
///   was installed with; ownership passes to the bridge
/// - `handle` must come from that runtime's install call. For an unknown
///   handle the request buffer cannot be released and is leaked.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hostfetch_fetch_callback(
    handle: u64,
    request: ByteBuffer,
) -> ByteBuffer {
    let call = AssertUnwindSafe(move || match BridgeRegistry::global().get(handle) {
        Ok(bridge) => bridge.invoke(request),
        Err(err) => {
            tracing::error!(code = err.error_code(), "fetch callback rejected: {}", err);
            ByteBuffer::empty()
        }
    });

    catch_panic(call).unwrap_or_default()
}

/// Set up log forwarding to the embedder
///
/// # Parameters
/// - `callback`: Optional log callback; `None` keeps logging silent
/// - `level`: Initial level (0=Trace .. 4=Error, 5=Off)
///
/// Also installs a panic hook that reports panics through the callback.
#[unsafe(no_mangle)]
pub extern "C" fn hostfetch_init_logging(callback: Option<LogCallback>, level: u8) {
    let _ = catch_panic(|| configure_logging(callback, LogLevel::from_u8(level)));
}

/// Change the log level at runtime
#[unsafe(no_mangle)]
pub extern "C" fn hostfetch_set_log_level(level: u8) {
    let _ = catch_panic(|| set_log_level(LogLevel::from_u8(level)));
}

/// Set up log forwarding from a bridge configuration
pub fn init_logging(config: &BridgeConfig, callback: Option<LogCallback>) -> BridgeResult<()> {
    configure_logging(callback, config.log_level()?);
    Ok(())
}

fn configure_logging(callback: Option<LogCallback>, level: LogLevel) {
    LogCallbackManager::global().set_callback(callback);
    hostfetch_logging::init_logging_with_level(level);
    set_log_level(level);
    install_panic_hook();
}

fn set_log_level(level: LogLevel) {
    LogCallbackManager::global().set_level(level);

    if let Err(e) = ReloadHandle::global().reload_level(level) {
        tracing::warn!("failed to reload tracing filter: {e}");
    }
}
