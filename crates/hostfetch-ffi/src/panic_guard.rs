//! Panic handling for FFI boundaries
//!
//! Panics must never unwind into the native runtime. Every exported entry
//! point and every call into host code runs under [`catch_panic`].

use std::any::Any;
use std::panic;
use std::sync::Once;

static PANIC_HOOK: Once = Once::new();

/// Run `f`, converting a panic into its message
pub fn catch_panic<F, R>(f: F) -> Result<R, String>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    panic::catch_unwind(f).map_err(|payload| panic_message(payload.as_ref()))
}

/// Extract a readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Install a panic hook that reports panics through `tracing`
///
/// Only the first call installs the hook. The previous hook is replaced, so
/// panics end up in the embedder's log callback instead of stderr.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        panic::set_hook(Box::new(|info| {
            let message = panic_message(info.payload());
            match info.location() {
                Some(location) => tracing::error!(
                    file = location.file(),
                    line = location.line(),
                    column = location.column(),
                    "PANIC: {message}"
                ),
                None => tracing::error!("PANIC: {message}"),
            }
        }));
    });
}
