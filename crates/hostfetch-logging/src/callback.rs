//! Embedder-supplied log callback

use hostfetch_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::ffi::CString;
use std::sync::atomic::{AtomicU8, Ordering};

/// FFI callback function type for logging
///
/// # Parameters
/// - `level`: Log level (0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error)
/// - `target`: Log target (module path), null-terminated C string
/// - `message`: Log message, pointer to UTF-8 bytes
/// - `message_len`: Length of the message in bytes
///
/// # Safety
/// `target` and `message` are only valid for the duration of the call.
pub type LogCallback = extern "C" fn(
    level: u8,
    target: *const std::ffi::c_char,
    message: *const u8,
    message_len: usize,
);

static CALLBACK_MANAGER: OnceCell<LogCallbackManager> = OnceCell::new();

/// Holds the embedder's log callback and the active level
pub struct LogCallbackManager {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
}

impl LogCallbackManager {
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Process-wide manager used by [`crate::FfiLoggingLayer`]
    pub fn global() -> &'static LogCallbackManager {
        CALLBACK_MANAGER.get_or_init(LogCallbackManager::new)
    }

    pub fn set_callback(&self, callback: Option<LogCallback>) {
        *self.callback.write() = callback;
    }

    pub fn get_callback(&self) -> Option<LogCallback> {
        *self.callback.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Whether a record at `level` would be forwarded
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Forward a record to the callback, if one is set and the level allows it
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let Some(callback) = self.get_callback() else {
            return;
        };

        // Module paths never contain NUL; drop the record rather than truncate it.
        let Ok(target) = CString::new(target) else {
            return;
        };

        callback(level as u8, target.as_ptr(), message.as_ptr(), message.len());
    }
}

impl Default for LogCallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
