//! Host HTTP client capability
//!
//! The bridge never performs network I/O itself. The host application supplies
//! an [`HttpClient`] and the bridge hands it one [`HostRequest`] per call.

use crate::body::BodyStream;
use crate::error::ClientError;
use crate::headers::Headers;
use std::io::Read;
use std::time::Duration;

/// HTTP method understood by the host client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Head,
    Options,
    Delete,
    Put,
    Trace,
    Connect,
}

/// Redirect handling requested from the host client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Follow redirects transparently
    Follow,
    /// Hand redirect responses back unchanged
    Manual,
}

/// Cookie handling requested from the host client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookiePolicy {
    Include,
    Omit,
}

/// Call parameters for a single host fetch
///
/// Borrows the decoded request, so it cannot outlive the bridge call.
#[derive(Debug)]
pub struct HostRequest<'a> {
    pub url: &'a str,
    pub method: HttpMethod,
    pub headers: Headers,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub body: Option<BodyStream<'a>>,
    pub redirect: Redirect,
    pub cookie_policy: CookiePolicy,
    pub use_caches: bool,
}

/// Result of a host fetch
pub struct HostResponse {
    pub url: String,
    pub status: u16,
    pub headers: Headers,
    pub body: Box<dyn Read + Send>,
}

impl HostResponse {
    /// Create a response with no headers and an empty body
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Headers::new(),
            body: Box::new(std::io::empty()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Use an in-memory body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Box::new(std::io::Cursor::new(body.into()));
        self
    }

    /// Use a streaming body
    pub fn with_body_reader(mut self, body: impl Read + Send + 'static) -> Self {
        self.body = Box::new(body);
        self
    }
}

impl std::fmt::Debug for HostResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostResponse")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP client supplied by the host application
///
/// Implementations may block; the bridge calls `fetch` on whatever thread
/// the native core used, and several calls may run at once.
pub trait HttpClient: Send + Sync {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError>;
}

impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
        (**self).fetch(request)
    }
}
