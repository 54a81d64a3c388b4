#![allow(non_snake_case)]

use super::*;
use crate::loopback::LoopbackNative;
use crate::native::FetchCallback;
use hostfetch_core::{
    BridgeConfig, CookiePolicy, Headers, HostRequest, HostResponse, HttpClient, HttpMethod,
    Redirect,
};
use hostfetch_transport::{BRIDGE_FAILURE_NAME, MessageCodec};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use test_case::test_case;

// ============================================================================
// Host clients
// ============================================================================

struct FixedClient;

impl HttpClient for FixedClient {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        Ok(HostResponse::new(request.url, 200)
            .with_header("Content-Type", "text/plain")
            .with_body("ok"))
    }
}

struct FailingClient;

impl HttpClient for FailingClient {
    fn fetch(&self, _request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        Err(ClientError::new("ConnectException", "connection refused"))
    }
}

struct PanickingClient;

impl HttpClient for PanickingClient {
    fn fetch(&self, _request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        panic!("client blew up")
    }
}

/// Echoes the request body and records the call parameters it saw
#[derive(Default)]
struct RecordingClient {
    seen: Mutex<Option<Seen>>,
}

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    method: HttpMethod,
    headers: Headers,
    redirect: Redirect,
    cookie_policy: CookiePolicy,
    use_caches: bool,
}

impl HttpClient for RecordingClient {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        *self.seen.lock() = Some(Seen {
            method: request.method,
            headers: request.headers.clone(),
            redirect: request.redirect,
            cookie_policy: request.cookie_policy,
            use_caches: request.use_caches,
        });

        let mut body = Vec::new();
        if let Some(mut stream) = request.body {
            io::Read::read_to_end(&mut stream, &mut body)?;
        }
        Ok(HostResponse::new(request.url, 200).with_body(body))
    }
}

struct BrokenBodyClient;

impl HttpClient for BrokenBodyClient {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        Ok(HostResponse::new(request.url, 200).with_body_reader(BrokenReader))
    }
}

struct BrokenReader;

impl io::Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset"))
    }
}

// ============================================================================
// Native runtimes
// ============================================================================

/// Loopback runtime whose allocations can be made to fail or to have the wrong size
#[derive(Default)]
struct FaultyNative {
    inner: LoopbackNative,
    fail_allocation: AtomicBool,
    short_allocation: AtomicBool,
    long_allocation: AtomicBool,
}

impl NativeAbi for FaultyNative {
    fn install(&self, handle: u64, callback: FetchCallback) {
        self.inner.install(handle, callback);
    }

    fn allocate(&self, size: usize) -> BridgeResult<ByteBuffer> {
        if self.fail_allocation.load(Ordering::SeqCst) {
            return Err(BridgeError::AllocationFailed { requested: size });
        }
        if self.short_allocation.load(Ordering::SeqCst) {
            return self.inner.allocate(size / 2);
        }
        if self.long_allocation.load(Ordering::SeqCst) {
            return self.inner.allocate(size * 2);
        }
        self.inner.allocate(size)
    }

    unsafe fn destroy(&self, buffer: ByteBuffer) {
        unsafe { self.inner.destroy(buffer) }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn loopback_with(client: impl HttpClient + 'static, config: BridgeConfig) -> Arc<LoopbackNative> {
    let native = Arc::new(LoopbackNative::new());
    let slot = HttpClientSlot::new(native.clone(), config);
    slot.set_client_instance(client);
    native
}

fn send(client: impl HttpClient + 'static, request: &Request) -> Response {
    let native = loopback_with(client, BridgeConfig::default());
    let response = native.send(request).unwrap();
    assert_eq!(native.live_buffers(), 0);
    response
}

fn exception_of(response: Response) -> (String, String) {
    match response {
        Response::Exception {
            exception_name,
            exception_message,
        } => (exception_name, exception_message),
        other => panic!("expected exception, got {other:?}"),
    }
}

// ============================================================================
// Protocol
// ============================================================================

#[test]
fn CallbackBridge___successful_fetch___returns_success_response() {
    let response = send(FixedClient, &Request::get("https://example.test/a"));

    assert_eq!(
        response,
        Response::success(
            "https://example.test/a",
            200,
            Headers::new().with("Content-Type", "text/plain"),
            b"ok".to_vec(),
        )
    );
}

#[test]
fn CallbackBridge___client_error___returns_exception_with_name_and_message() {
    let response = send(FailingClient, &Request::get("https://example.test/"));

    assert_eq!(
        exception_of(response),
        (
            "ConnectException".to_string(),
            "connection refused".to_string()
        )
    );
}

#[test]
fn CallbackBridge___client_panics___returns_panic_exception() {
    let response = send(PanickingClient, &Request::get("https://example.test/"));

    assert_eq!(
        exception_of(response),
        ("Panic".to_string(), "client blew up".to_string())
    );
}

#[test]
fn CallbackBridge___supplier_panics___returns_panic_exception() {
    let native = Arc::new(LoopbackNative::new());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client(|| panic!("no client today"));

    let response = native.send(&Request::get("https://example.test/")).unwrap();

    let (name, message) = exception_of(response);
    assert_eq!(name, "Panic");
    assert_eq!(message, "no client today");
    assert_eq!(native.live_buffers(), 0);
}

#[test]
fn CallbackBridge___malformed_request___returns_decode_exception_and_frees_input() {
    let native = loopback_with(FixedClient, BridgeConfig::default());

    let bytes = native.call_raw(b"{not json").unwrap();
    let response = MessageCodec::new().decode_response(&bytes).unwrap();

    let (name, _) = exception_of(response);
    assert_eq!(name, "hostfetch.DecodeError");
    assert_eq!(native.live_buffers(), 0);
}

#[test]
fn CallbackBridge___empty_request___returns_decode_exception() {
    let native = Arc::new(LoopbackNative::new());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client_instance(FixedClient);
    let bridge = CallbackBridge::new(slot);

    let output = bridge.invoke(ByteBuffer::empty());
    let response = MessageCodec::new()
        .decode_response(unsafe { output.as_slice() })
        .unwrap();
    unsafe { native.destroy(output) };

    assert_eq!(exception_of(response).0, "hostfetch.DecodeError");
    assert_eq!(native.live_buffers(), 0);
}

#[test]
fn CallbackBridge___request_fields___reach_host_client() {
    let client = Arc::new(RecordingClient::default());
    let request = Request::post("https://example.test/upload")
        .header("X", "1")
        .header("X", "2")
        .body(b"payload".to_vec())
        .follow_redirects(false)
        .include_cookies(false)
        .use_caches(false);

    let response = send(client.clone(), &request);

    assert_eq!(
        client.seen.lock().clone(),
        Some(Seen {
            method: HttpMethod::Post,
            headers: Headers::new().with("X", "1").with("X", "2"),
            redirect: Redirect::Manual,
            cookie_policy: CookiePolicy::Omit,
            use_caches: false,
        })
    );
    assert!(matches!(response, Response::Success { body, .. } if body == b"payload"));
}

#[test]
fn CallbackBridge___body_read_error___returns_io_exception() {
    let response = send(BrokenBodyClient, &Request::get("https://example.test/"));

    assert_eq!(
        exception_of(response),
        ("IoError".to_string(), "stream reset".to_string())
    );
}

#[test]
fn CallbackBridge___body_over_limit___returns_response_too_large() {
    let native = loopback_with(
        FixedClient,
        BridgeConfig::default().with_max_response_body_bytes(1),
    );

    let response = native.send(&Request::get("https://example.test/")).unwrap();

    assert_eq!(exception_of(response).0, "ResponseTooLarge");
}

#[test]
fn CallbackBridge___body_at_limit___succeeds() {
    let native = loopback_with(
        FixedClient,
        BridgeConfig::default().with_max_response_body_bytes(2),
    );

    let response = native.send(&Request::get("https://example.test/")).unwrap();

    assert!(response.is_success());
}

#[test]
fn CallbackBridge___body_limit_usize_max___returns_full_body() {
    let native = loopback_with(
        FixedClient,
        BridgeConfig::default().with_max_response_body_bytes(usize::MAX),
    );

    let response = native.send(&Request::get("https://example.test/")).unwrap();

    assert!(response.is_success());
    assert_eq!(native.live_buffers(), 0);
}

// ============================================================================
// Output buffer failures
// ============================================================================

fn faulty_bridge() -> (Arc<FaultyNative>, CallbackBridge) {
    let native = Arc::new(FaultyNative::default());
    let slot = HttpClientSlot::new(native.clone(), BridgeConfig::default());
    slot.set_client_instance(FixedClient);
    (native, CallbackBridge::new(slot))
}

fn encoded_get(native: &FaultyNative) -> ByteBuffer {
    let bytes = MessageCodec::new()
        .encode_request(&Request::get("https://example.test/"))
        .unwrap();
    native.inner.buffer_from(&bytes).unwrap()
}

#[test]
fn CallbackBridge___allocation_fails___returns_empty_buffer_without_leaks() {
    let (native, bridge) = faulty_bridge();
    let input = encoded_get(&native);
    native.fail_allocation.store(true, Ordering::SeqCst);

    let output = bridge.invoke(input);

    assert!(output.is_null());
    assert_eq!(native.inner.live_buffers(), 0);
}

#[test]
fn CallbackBridge___short_allocation___destroys_it_and_returns_empty_buffer() {
    let (native, bridge) = faulty_bridge();
    let input = encoded_get(&native);
    native.short_allocation.store(true, Ordering::SeqCst);

    let output = bridge.invoke(input);

    assert!(output.is_null());
    assert_eq!(native.inner.allocations(), 2);
    assert_eq!(native.inner.live_buffers(), 0);
}

#[test]
fn CallbackBridge___long_allocation___destroys_it_and_returns_empty_buffer() {
    let (native, bridge) = faulty_bridge();
    let input = encoded_get(&native);
    native.long_allocation.store(true, Ordering::SeqCst);

    let output = bridge.invoke(input);

    assert!(output.is_null());
    assert_eq!(native.inner.allocations(), 2);
    assert_eq!(native.inner.frees(), 2);
    assert_eq!(native.inner.live_buffers(), 0);
}

#[test]
fn CallbackBridge___empty_output___decodes_as_bridge_failure() {
    let (native, bridge) = faulty_bridge();
    let input = encoded_get(&native);
    native.fail_allocation.store(true, Ordering::SeqCst);

    let output = bridge.invoke(input);
    let response = MessageCodec::new()
        .decode_response(unsafe { output.as_slice() })
        .unwrap();

    assert_eq!(exception_of(response).0, BRIDGE_FAILURE_NAME);
}

#[test]
fn CallbackBridge___success___output_not_destroyed_by_bridge() {
    let (native, bridge) = faulty_bridge();
    let input = encoded_get(&native);

    let output = bridge.invoke(input);

    assert!(!output.is_null());
    assert_eq!(native.inner.frees(), 1);
    assert_eq!(native.inner.live_buffers(), 1);
    unsafe { native.destroy(output) };
    assert_eq!(native.inner.live_buffers(), 0);
}

// ============================================================================
// read_body
// ============================================================================

#[test]
fn read_body___no_limit___reads_everything() {
    let mut body = io::Cursor::new(vec![1u8; 1000]);

    let bytes = read_body(&mut body, None).unwrap();

    assert_eq!(bytes.len(), 1000);
}

#[test]
fn read_body___over_limit___returns_response_too_large() {
    let mut body = io::Cursor::new(vec![1u8; 11]);

    let err = read_body(&mut body, Some(10)).unwrap_err();

    assert_eq!(err.exception_name(), "ResponseTooLarge");
    assert_eq!(err.exception_message(), "response body exceeds 10 bytes");
}

#[test_case(Some(0), 0 ; "empty body at zero limit")]
#[test_case(Some(1000), 1000 ; "body at limit")]
#[test_case(Some(usize::MAX), 1000 ; "limit at usize max")]
fn read_body___within_limit___reads_everything(limit: Option<usize>, len: usize) {
    let mut body = io::Cursor::new(vec![1u8; len]);

    let bytes = read_body(&mut body, limit).unwrap();

    assert_eq!(bytes.len(), len);
}

#[test]
fn read_body___timed_out_read___maps_to_timeout_error() {
    struct SlowReader;
    impl io::Read for SlowReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"))
        }
    }

    let err = read_body(&mut SlowReader, None).unwrap_err();

    assert_eq!(err.exception_name(), "TimeoutError");
}
