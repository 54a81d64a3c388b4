//! Per-call fetch protocol between the native runtime and the host client

use crate::buffer::ByteBuffer;
use crate::native::NativeAbi;
use crate::panic_guard::catch_panic;
use crate::slot::HttpClientSlot;
use hostfetch_core::{BridgeError, BridgeResult, ClientError, Request, Response, translate};
use hostfetch_transport::MessageCodec;
use std::io::Read;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Entry point the native runtime calls for each fetch
///
/// One call runs: decode the request, release the request buffer, execute it
/// against the slot's client under the read lock, encode the outcome into a
/// freshly allocated native buffer. Every failure becomes an exception
/// response; only a failure to produce the output buffer itself yields an
/// empty buffer.
pub struct CallbackBridge {
    slot: Arc<HttpClientSlot>,
    codec: MessageCodec,
}

impl CallbackBridge {
    pub(crate) fn new(slot: Arc<HttpClientSlot>) -> Self {
        Self {
            slot,
            codec: MessageCodec::new(),
        }
    }

    pub fn slot(&self) -> &Arc<HttpClientSlot> {
        &self.slot
    }

    /// Run one fetch; never panics
    ///
    /// Takes ownership of `request`, which is destroyed through the native
    /// runtime on every path. The returned buffer belongs to the caller.
    pub fn invoke(&self, request: ByteBuffer) -> ByteBuffer {
        match catch_panic(AssertUnwindSafe(|| self.invoke_inner(request))) {
            Ok(output) => output,
            Err(message) => {
                tracing::error!("fetch bridge panicked: {message}");
                ByteBuffer::empty()
            }
        }
    }

    fn invoke_inner(&self, request: ByteBuffer) -> ByteBuffer {
        let native = self.slot.native().as_ref();

        let input = NativeBuffer::new(native, request);
        let decoded = self.codec.decode_request(input.bytes());
        drop(input);

        let response = match decoded {
            Ok(request) => self.execute(&request),
            Err(e) => {
                let err = BridgeError::from(e);
                tracing::warn!("failed to decode fetch request: {err}");
                Response::from(&err)
            }
        };

        match self.write_output(native, &response) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(code = e.error_code(), "failed to return fetch response: {e}");
                ByteBuffer::empty()
            }
        }
    }

    /// Execute a decoded request against the current client
    fn execute(&self, request: &Request) -> Response {
        tracing::debug!(method = %request.method, url = %request.url, "fetch");

        let state = self.slot.read_state();
        let limit = self.slot.config().max_response_body_bytes;

        let outcome = catch_panic(AssertUnwindSafe(|| -> BridgeResult<Response> {
            let client = state.client()?;
            let mut response = client.fetch(translate(request))?;
            let body = read_body(&mut response.body, limit)?;
            Ok(Response::success(
                response.url,
                response.status,
                response.headers,
                body,
            ))
        }));
        drop(state);

        match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(url = %request.url, "fetch failed: {e}");
                Response::from(&e)
            }
            Err(message) => {
                tracing::error!(url = %request.url, "host client panicked: {message}");
                Response::from(&BridgeError::Panic(message))
            }
        }
    }

    /// Encode `response` into a native buffer of exactly its encoded length
    fn write_output(
        &self,
        native: &dyn NativeAbi,
        response: &Response,
    ) -> BridgeResult<ByteBuffer> {
        let bytes = self.codec.encode_response(response)?;
        let mut output = NativeBuffer::new(native, native.allocate(bytes.len())?);

        let actual = output.len();
        if actual != bytes.len() {
            return Err(BridgeError::BufferSizeMismatch {
                requested: bytes.len(),
                actual,
            });
        }

        output.bytes_mut().copy_from_slice(&bytes);
        Ok(output.release())
    }
}

/// Read a response body, failing once it exceeds `limit` bytes
fn read_body(body: &mut dyn Read, limit: Option<usize>) -> BridgeResult<Vec<u8>> {
    let mut bytes = Vec::new();

    match limit {
        None => {
            body.read_to_end(&mut bytes).map_err(ClientError::from)?;
        }
        Some(limit) => {
            // one byte past the limit is enough to detect an oversized body
            let cap = u64::try_from(limit).map_or(u64::MAX, |l| l.saturating_add(1));
            body.take(cap)
                .read_to_end(&mut bytes)
                .map_err(ClientError::from)?;
            if bytes.len() > limit {
                return Err(ClientError::new(
                    "ResponseTooLarge",
                    format!("response body exceeds {limit} bytes"),
                )
                .into());
            }
        }
    }

    Ok(bytes)
}

/// Native buffer destroyed on drop unless released
struct NativeBuffer<'a> {
    native: &'a dyn NativeAbi,
    buffer: Option<ByteBuffer>,
}

impl<'a> NativeBuffer<'a> {
    fn new(native: &'a dyn NativeAbi, buffer: ByteBuffer) -> Self {
        Self {
            native,
            buffer: Some(buffer),
        }
    }

    fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, ByteBuffer::len)
    }

    fn bytes(&self) -> &[u8] {
        match &self.buffer {
            // SAFETY: the native runtime hands over valid buffers and this guard
            // holds the only reference until it is destroyed or released
            Some(buffer) => unsafe { buffer.as_slice() },
            None => &[],
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.buffer {
            // SAFETY: see bytes
            Some(buffer) => unsafe { buffer.as_mut_slice() },
            None => &mut [],
        }
    }

    /// Give up ownership without destroying the buffer
    fn release(mut self) -> ByteBuffer {
        self.buffer.take().unwrap_or_default()
    }
}

impl Drop for NativeBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            // SAFETY: the buffer came from this native runtime and is not used again
            unsafe { self.native.destroy(buffer) };
        }
    }
}

#[cfg(test)]
#[path = "bridge/bridge_tests.rs"]
mod bridge_tests;
