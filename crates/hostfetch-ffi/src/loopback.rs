//! In-process native runtime on the Rust allocator

use crate::buffer::ByteBuffer;
use crate::native::{FetchCallback, NativeAbi};
use hostfetch_core::{BridgeError, BridgeResult, Request, Response};
use hostfetch_transport::MessageCodec;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Native runtime that lives in the same process as the bridge
///
/// Plays the native side of the protocol for a core written in Rust: it keeps
/// the installed callback, allocates buffers with the global allocator and can
/// issue fetches through the bridge. It also counts installs, allocations and
/// frees, which makes buffer ownership observable.
pub struct LoopbackNative {
    installed: RwLock<Option<(u64, FetchCallback)>>,
    installs: AtomicUsize,
    allocations: AtomicUsize,
    frees: AtomicUsize,
    codec: MessageCodec,
}

impl LoopbackNative {
    pub fn new() -> Self {
        Self {
            installed: RwLock::new(None),
            installs: AtomicUsize::new(0),
            allocations: AtomicUsize::new(0),
            frees: AtomicUsize::new(0),
            codec: MessageCodec::new(),
        }
    }

    /// Handle of the installed callback, if any
    pub fn installed_handle(&self) -> Option<u64> {
        (*self.installed.read()).map(|(handle, _)| handle)
    }

    /// Number of times `install` was called
    pub fn install_count(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    /// Number of non-empty buffers handed out
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    /// Number of non-empty buffers released
    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    /// Buffers allocated but not yet released
    pub fn live_buffers(&self) -> usize {
        self.allocations().saturating_sub(self.frees())
    }

    /// Copy `bytes` into a native buffer
    pub fn buffer_from(&self, bytes: &[u8]) -> BridgeResult<ByteBuffer> {
        let mut buffer = self.allocate(bytes.len())?;
        // SAFETY: freshly allocated with exactly bytes.len() bytes
        unsafe { buffer.as_mut_slice() }.copy_from_slice(bytes);
        Ok(buffer)
    }

    /// Pass raw request bytes to the installed callback, returning the raw
    /// response bytes
    ///
    /// The request buffer is owned by the bridge once passed; the returned
    /// buffer is read and released here.
    pub fn call_raw(&self, request: &[u8]) -> BridgeResult<Vec<u8>> {
        let (handle, callback) = (*self.installed.read()).ok_or(BridgeError::NotInstalled)?;

        let input = self.buffer_from(request)?;
        // SAFETY: callback was installed by the bridge and takes ownership of input
        let output = unsafe { callback(handle, input) };

        // SAFETY: the bridge allocated output through this runtime
        let bytes = unsafe { output.as_slice() }.to_vec();
        // SAFETY: ownership of output was transferred to us
        unsafe { self.destroy(output) };
        Ok(bytes)
    }

    /// Issue a fetch through the installed bridge
    pub fn send(&self, request: &Request) -> BridgeResult<Response> {
        let encoded = self.codec.encode_request(request)?;
        let bytes = self.call_raw(&encoded)?;
        Ok(self.codec.decode_response(&bytes)?)
    }
}

impl Default for LoopbackNative {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeAbi for LoopbackNative {
    fn install(&self, handle: u64, callback: FetchCallback) {
        *self.installed.write() = Some((handle, callback));
        self.installs.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(handle, "loopback native received fetch callback");
    }

    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer> {
        if size == 0 {
            return Ok(ByteBuffer::empty());
        }
        self.allocations.fetch_add(1, Ordering::SeqCst);
        Ok(ByteBuffer::from_vec(vec![0; size]))
    }

    unsafe fn destroy(&self, buffer: ByteBuffer) {
        if buffer.is_null() {
            return;
        }
        self.frees.fetch_add(1, Ordering::SeqCst);
        // SAFETY: every non-null buffer of this runtime comes from from_vec
        drop(unsafe { buffer.into_vec() });
    }
}
