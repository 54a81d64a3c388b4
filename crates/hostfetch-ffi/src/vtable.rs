//! Native runtime supplied as a table of C function pointers

use crate::buffer::ByteBuffer;
use crate::native::{FetchCallback, NativeAbi, abi_len, check_allocation};
use hostfetch_core::BridgeResult;

/// Native entry points of a statically linked core
///
/// Layout matches the C struct the core exports, so a core can hand the
/// application a pointer to its table directly.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NativeVTable {
    /// Store the fetch callback and its handle
    pub initialize: unsafe extern "C" fn(handle: u64, callback: FetchCallback),
    /// Allocate a buffer of the given length
    pub alloc_bytebuffer: unsafe extern "C" fn(len: i64) -> ByteBuffer,
    /// Release a buffer
    pub destroy_bytebuffer: unsafe extern "C" fn(buffer: ByteBuffer),
}

impl NativeAbi for NativeVTable {
    fn install(&self, handle: u64, callback: FetchCallback) {
        // SAFETY: the core guarantees its table entries are callable
        unsafe { (self.initialize)(handle, callback) }
    }

    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer> {
        let len = abi_len(size)?;
        // SAFETY: see install
        let buffer = unsafe { (self.alloc_bytebuffer)(len) };
        check_allocation(size, buffer)
    }

    unsafe fn destroy(&self, buffer: ByteBuffer) {
        // SAFETY: buffer ownership is the caller's contract
        unsafe { (self.destroy_bytebuffer)(buffer) }
    }
}
