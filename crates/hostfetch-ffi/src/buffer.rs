//! Byte buffer crossing the native boundary

use std::ptr;

/// Length-prefixed byte region passed by value across the C ABI
///
/// A `ByteBuffer` has exactly one owner at a time:
/// - request buffers are allocated by the native runtime and destroyed by the
///   bridge once decoded
/// - response buffers are allocated through the native runtime by the bridge
///   and handed back; from then on the native side owns them
///
/// The type is deliberately not `Clone`, and destruction consumes it.
#[repr(C)]
#[derive(Debug)]
pub struct ByteBuffer {
    /// Length of the data in bytes
    pub len: i64,
    /// Pointer to the data (null for an empty buffer)
    pub data: *mut u8,
}

impl ByteBuffer {
    /// Create an empty (null) buffer
    pub fn empty() -> Self {
        Self {
            len: 0,
            data: ptr::null_mut(),
        }
    }

    /// Create a buffer owning the contents of a Vec on the Rust allocator
    ///
    /// The allocation is shrunk to exactly `vec.len()` bytes. Release it with
    /// [`ByteBuffer::into_vec`]. An empty Vec yields a null buffer.
    pub fn from_vec(vec: Vec<u8>) -> Self {
        if vec.is_empty() {
            return Self::empty();
        }
        let boxed = vec.into_boxed_slice();
        let len = boxed.len() as i64;
        let data = Box::into_raw(boxed).cast::<u8>();
        Self { len, data }
    }

    /// Reclaim a buffer created by [`ByteBuffer::from_vec`]
    ///
    /// # Safety
    ///
    /// The buffer must come from `from_vec` (or be null) and must not have
    /// been reclaimed before.
    pub unsafe fn into_vec(self) -> Vec<u8> {
        let len = self.len();
        if len == 0 {
            return Vec::new();
        }
        let slice = ptr::slice_from_raw_parts_mut(self.data, len);
        // SAFETY: from_vec leaked a Box<[u8]> of exactly `len` bytes at `data`
        unsafe { Box::from_raw(slice) }.into_vec()
    }

    /// Whether the buffer has no data
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    /// Usable length in bytes; zero for null or negative-length buffers
    pub fn len(&self) -> usize {
        if self.data.is_null() {
            0
        } else {
            usize::try_from(self.len).unwrap_or(0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the data
    ///
    /// # Safety
    ///
    /// `data` must point to `len` readable bytes that stay valid while the
    /// slice is alive.
    pub unsafe fn as_slice(&self) -> &[u8] {
        if self.is_empty() {
            return &[];
        }
        // SAFETY: non-null with positive length, validity is the caller's contract
        unsafe { std::slice::from_raw_parts(self.data, self.len()) }
    }

    /// Mutable view of the data
    ///
    /// # Safety
    ///
    /// Same as [`ByteBuffer::as_slice`], and the bytes must be writable.
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.is_empty() {
            return &mut [];
        }
        // SAFETY: see as_slice
        unsafe { std::slice::from_raw_parts_mut(self.data, self.len()) }
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

// ByteBuffer is Send because it exclusively owns its data
unsafe impl Send for ByteBuffer {}
