//! Dynamic log level reloading

use hostfetch_core::{BridgeError, LogLevel};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Registry, reload};

type FilterHandle = reload::Handle<LevelFilter, Registry>;

/// Handle for changing the level filter installed by [`crate::init_logging`]
pub struct ReloadHandle {
    handle: Mutex<Option<FilterHandle>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub(crate) fn set_handle(&self, handle: FilterHandle) {
        *self.handle.lock() = Some(handle);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Swap the filter to `level`
    pub fn reload_level(&self, level: LogLevel) -> Result<(), BridgeError> {
        let guard = self.handle.lock();
        let handle = guard
            .as_ref()
            .ok_or_else(|| BridgeError::Config("logging not initialized".to_string()))?;
        handle
            .reload(convert_level_to_filter(level))
            .map_err(|e| BridgeError::Config(format!("failed to reload filter: {e}")))
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn convert_level_to_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
