//! Request and response messages exchanged with the native core
//!
//! Both messages are immutable once decoded. The native core serializes a
//! [`Request`], the bridge answers with exactly one [`Response`] variant.

use crate::error::ClientError;
use crate::headers::Headers;
use serde::{Deserialize, Serialize};

/// HTTP method of a wire request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Head,
    Options,
    Delete,
    Put,
    Trace,
    Connect,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Delete => "DELETE",
            Method::Put => "PUT",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Request produced by the native core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub url: String,

    pub method: Method,

    #[serde(default)]
    pub headers: Headers,

    /// Raw body bytes, absent for body-less requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<u8>>,

    /// Connect timeout in seconds (0 = no timeout)
    #[serde(default)]
    pub connect_timeout_secs: u32,

    /// Read timeout in seconds (0 = no timeout)
    #[serde(default)]
    pub read_timeout_secs: u32,

    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    #[serde(default = "default_true")]
    pub include_cookies: bool,

    #[serde(default = "default_true")]
    pub use_caches: bool,
}

impl Request {
    /// Create a request with default policies and no timeouts
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Headers::new(),
            body: None,
            connect_timeout_secs: 0,
            read_timeout_secs: 0,
            follow_redirects: true,
            include_cookies: true,
            use_caches: true,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::Head, url)
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u32) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn read_timeout_secs(mut self, secs: u32) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn include_cookies(mut self, include: bool) -> Self {
        self.include_cookies = include;
        self
    }

    pub fn use_caches(mut self, use_caches: bool) -> Self {
        self.use_caches = use_caches;
        self
    }
}

/// Response returned to the native core
///
/// The wire form carries a `type` tag so a decoder can never see both
/// variants populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// The host client produced a response
    Success {
        url: String,
        status: u16,
        #[serde(default)]
        headers: Headers,
        #[serde(default)]
        body: Vec<u8>,
    },

    /// The fetch failed
    Exception {
        exception_name: String,
        exception_message: String,
    },
}

impl Response {
    /// Build a success response
    pub fn success(url: impl Into<String>, status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Response::Success {
            url: url.into(),
            status,
            headers,
            body,
        }
    }

    /// Build a failure response
    pub fn exception(name: impl Into<String>, message: impl Into<String>) -> Self {
        Response::Exception {
            exception_name: name.into(),
            exception_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Status code of a success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Response::Success { status, .. } => Some(*status),
            Response::Exception { .. } => None,
        }
    }

    /// Convert a failure response back into the error that caused it
    pub fn into_result(self) -> Result<Self, ClientError> {
        match self {
            Response::Exception {
                exception_name,
                exception_message,
            } => Err(ClientError::new(exception_name, exception_message)),
            success => Ok(success),
        }
    }
}

impl From<&crate::error::BridgeError> for Response {
    fn from(err: &crate::error::BridgeError) -> Self {
        Response::exception(err.exception_name(), err.exception_message())
    }
}

impl From<ClientError> for Response {
    fn from(err: ClientError) -> Self {
        Response::exception(err.name(), err.message())
    }
}
