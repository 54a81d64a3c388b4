//! Native runtime loaded from a shared library

use crate::buffer::ByteBuffer;
use crate::native::{FetchCallback, NativeAbi};
use crate::vtable::NativeVTable;
use hostfetch_core::{BridgeConfig, BridgeError, BridgeResult};
use libloading::Library;
use std::ffi::CString;
use std::path::Path;

type InitializeFn = unsafe extern "C" fn(handle: u64, callback: FetchCallback);
type AllocFn = unsafe extern "C" fn(len: i64) -> ByteBuffer;
type DestroyFn = unsafe extern "C" fn(buffer: ByteBuffer);

/// A native core loaded with `libloading`
///
/// Resolves `<prefix>_initialize`, `<prefix>_alloc_bytebuffer` and
/// `<prefix>_destroy_bytebuffer`. The library stays loaded for as long as this
/// value lives; since the installed callback may be called at any time, keep
/// it alive for the rest of the process.
pub struct NativeLibrary {
    /// Must outlive every call through `vtable`
    _library: Library,
    vtable: NativeVTable,
    prefix: String,
}

impl NativeLibrary {
    /// Load a native core using the symbol prefix from `config`
    pub fn load(path: impl AsRef<Path>, config: &BridgeConfig) -> BridgeResult<Self> {
        Self::load_with_prefix(path, &config.native_symbol_prefix)
    }

    /// Load a native core whose exports use `prefix`
    pub fn load_with_prefix(path: impl AsRef<Path>, prefix: &str) -> BridgeResult<Self> {
        let path = path.as_ref();

        // SAFETY: loading runs the library's initializers; the caller is
        // responsible for the path pointing at a trusted native core.
        let library = unsafe { Library::new(path) }
            .map_err(|e| BridgeError::LibraryLoad(format!("{}: {e}", path.display())))?;

        let initialize: InitializeFn = resolve(&library, prefix, "initialize")?;
        let alloc_bytebuffer: AllocFn = resolve(&library, prefix, "alloc_bytebuffer")?;
        let destroy_bytebuffer: DestroyFn = resolve(&library, prefix, "destroy_bytebuffer")?;

        tracing::debug!(path = %path.display(), prefix, "native core loaded");

        Ok(Self {
            _library: library,
            vtable: NativeVTable {
                initialize,
                alloc_bytebuffer,
                destroy_bytebuffer,
            },
            prefix: prefix.to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Look up `<prefix>_<name>` and copy the function pointer out of the symbol
fn resolve<T: Copy>(library: &Library, prefix: &str, name: &str) -> BridgeResult<T> {
    let symbol = symbol_name(prefix, name)?;
    // SAFETY: T is the documented signature of the exported function
    let found = unsafe { library.get::<T>(symbol.as_bytes_with_nul()) }
        .map_err(|e| BridgeError::SymbolNotFound(format!("{prefix}_{name}: {e}")))?;
    Ok(*found)
}

fn symbol_name(prefix: &str, name: &str) -> BridgeResult<CString> {
    CString::new(format!("{prefix}_{name}"))
        .map_err(|_| BridgeError::Config(format!("symbol prefix contains NUL: {prefix:?}")))
}

impl NativeAbi for NativeLibrary {
    fn install(&self, handle: u64, callback: FetchCallback) {
        self.vtable.install(handle, callback);
    }

    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer> {
        self.vtable.allocate(size)
    }

    unsafe fn destroy(&self, buffer: ByteBuffer) {
        // SAFETY: forwarded contract
        unsafe { self.vtable.destroy(buffer) }
    }
}
