//! Functions the bridge needs from the native runtime

use crate::buffer::ByteBuffer;
use hostfetch_core::{BridgeError, BridgeResult};

/// Callback the native runtime invokes for every fetch
///
/// `handle` is the value passed to [`NativeAbi::install`]. The callback takes
/// ownership of `request` and returns a buffer the native side now owns.
pub type FetchCallback = unsafe extern "C" fn(handle: u64, request: ByteBuffer) -> ByteBuffer;

/// Native runtime as seen by the bridge
///
/// Buffers passed to [`NativeAbi::destroy`] must have come from the same
/// runtime, either through [`NativeAbi::allocate`] or as a request buffer.
pub trait NativeAbi: Send + Sync {
    /// Hand the fetch callback to the native runtime
    ///
    /// The runtime keeps `(handle, callback)` and may call it from any thread
    /// for the rest of the process.
    fn install(&self, handle: u64, callback: FetchCallback);

    /// Allocate a buffer of `size` bytes owned by the native runtime
    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer>;

    /// Release a buffer owned by the native runtime
    ///
    /// # Safety
    ///
    /// `buffer` must belong to this runtime and must not be used afterwards.
    unsafe fn destroy(&self, buffer: ByteBuffer);
}

/// Reject a null allocation for a non-zero request
pub(crate) fn check_allocation(requested: usize, buffer: ByteBuffer) -> BridgeResult<ByteBuffer> {
    if requested > 0 && buffer.is_null() {
        return Err(BridgeError::AllocationFailed { requested });
    }
    Ok(buffer)
}

/// Size as the native ABI's signed length
pub(crate) fn abi_len(requested: usize) -> BridgeResult<i64> {
    i64::try_from(requested).map_err(|_| BridgeError::AllocationFailed { requested })
}
