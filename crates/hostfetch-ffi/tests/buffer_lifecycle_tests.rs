//! Buffer ownership across many bridge calls
//!
//! Every request buffer must be destroyed exactly once by the bridge and every
//! response buffer must reach the caller undestroyed.

use hostfetch_core::{
    BridgeError, BridgeResult, ClientError, HostRequest, HostResponse, HttpClient, Request,
};
use hostfetch_ffi::{
    BridgeConfig, ByteBuffer, FetchCallback, HttpClientSlot, LoopbackNative, NativeAbi,
    hostfetch_fetch_callback,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

struct AlternatingClient(AtomicUsize);

impl HttpClient for AlternatingClient {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        match n % 3 {
            0 => Ok(HostResponse::new(request.url, 200).with_body(vec![b'x'; n])),
            1 => Err(ClientError::new("ConnectException", "refused")),
            _ => panic!("call {n} panicked"),
        }
    }
}

#[test]
fn test_mixed_outcomes_leave_no_live_buffers() {
    let native = Arc::new(LoopbackNative::new());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client_instance(AlternatingClient(AtomicUsize::new(0)));

    for i in 0..60 {
        let request = Request::post("https://example.test/").body(vec![i as u8; i]);
        let response = native.send(&request).unwrap();
        assert_eq!(response.is_success(), i % 3 == 0);
    }

    assert_eq!(native.allocations(), 120);
    assert_eq!(native.frees(), 120);
    assert_eq!(native.live_buffers(), 0);
}

#[test]
fn test_malformed_requests_free_input() {
    let native = Arc::new(LoopbackNative::new());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client_instance(AlternatingClient(AtomicUsize::new(0)));

    for payload in [&b"\xff\xfe"[..], b"[]", b"{\"url\": 5}", b"null"] {
        let bytes = native.call_raw(payload).unwrap();
        assert!(!bytes.is_empty());
    }

    assert_eq!(native.live_buffers(), 0);
}

/// Counts destroys per buffer address to catch double frees
#[derive(Default)]
struct AuditingNative {
    inner: LoopbackNative,
    destroyed: parking_lot::Mutex<Vec<usize>>,
    fail_allocation: AtomicBool,
}

impl NativeAbi for AuditingNative {
    fn install(&self, handle: u64, callback: FetchCallback) {
        self.inner.install(handle, callback);
    }

    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer> {
        if self.fail_allocation.load(Ordering::SeqCst) {
            return Err(BridgeError::AllocationFailed { requested: size });
        }
        self.inner.allocate(size)
    }

    unsafe fn destroy(&self, buffer: ByteBuffer) {
        self.destroyed.lock().push(buffer.data as usize);
        unsafe { self.inner.destroy(buffer) }
    }
}

#[test]
fn test_input_destroyed_exactly_once_when_output_allocation_fails() {
    let native = Arc::new(AuditingNative::default());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client_instance(AlternatingClient(AtomicUsize::new(0)));
    let handle = slot.registration_handle().unwrap();

    let encoded = hostfetch_transport::MessageCodec::new()
        .encode_request(&Request::get("https://example.test/"))
        .unwrap();
    let input = native.inner.buffer_from(&encoded).unwrap();
    let address = input.data as usize;
    native.fail_allocation.store(true, Ordering::SeqCst);

    let output = unsafe { hostfetch_fetch_callback(handle, input) };

    assert!(output.is_null());
    assert_eq!(*native.destroyed.lock(), vec![address]);
    assert_eq!(native.inner.live_buffers(), 0);
}
