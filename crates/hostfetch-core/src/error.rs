//! Error types for the hostfetch bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failure raised by a host HTTP client
///
/// Carries the pair the native core sees in a failure response: a type
/// identifier and a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct ClientError {
    name: String,
    message: String,
}

impl ClientError {
    /// Create a client error with an explicit type identifier
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a `TimeoutError`
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new("TimeoutError", message)
    }

    /// Capture an error, using its concrete Rust type path as the identifier
    ///
    /// Trait objects carry no useful type path, so `E` must be sized. For a
    /// `Box<dyn Error>` pick a name and use [`ClientError::new`].
    ///
    /// ```compile_fail
    /// let err: Box<dyn std::error::Error> = "boom".into();
    /// let _ = hostfetch_core::ClientError::from_error(&*err);
    /// ```
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error,
    {
        Self::new(std::any::type_name::<E>(), err.to_string())
    }

    /// Type identifier of the failure
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message of the failure
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        let name = match err.kind() {
            std::io::ErrorKind::TimedOut => "TimeoutError",
            _ => "IoError",
        };
        Self::new(name, err.to_string())
    }
}

/// Error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Request bytes could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Response could not be encoded
    #[error("encode error: {0}")]
    Encode(String),

    /// Native runtime failed to allocate an output buffer
    #[error("native allocation of {requested} bytes failed")]
    AllocationFailed { requested: usize },

    /// Native runtime returned a buffer of a different size than requested
    #[error("buffer size mismatch: requested {requested} bytes, got {actual}")]
    BufferSizeMismatch { requested: usize, actual: usize },

    /// Bridge was invoked before a client was installed
    #[error("no HTTP client installed")]
    NotInstalled,

    /// Native runtime called back with a handle that was never registered
    #[error("unknown bridge handle: {0}")]
    UnknownHandle(u64),

    /// The host client failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// A panic was caught inside the bridge
    #[error("panic: {0}")]
    Panic(String),

    /// Native library could not be loaded
    #[error("failed to load native library: {0}")]
    LibraryLoad(String),

    /// Native library is missing a required symbol
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Async runtime error
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl BridgeError {
    /// Returns an error code suitable for FFI
    pub fn error_code(&self) -> u32 {
        match self {
            BridgeError::Decode(_) => 1,
            BridgeError::Encode(_) => 2,
            BridgeError::AllocationFailed { .. } => 3,
            BridgeError::BufferSizeMismatch { .. } => 4,
            BridgeError::NotInstalled => 5,
            BridgeError::UnknownHandle(_) => 6,
            BridgeError::Client(_) => 7,
            BridgeError::Panic(_) => 8,
            BridgeError::LibraryLoad(_) => 9,
            BridgeError::SymbolNotFound(_) => 10,
            BridgeError::Config(_) => 11,
            BridgeError::Runtime(_) => 12,
        }
    }

    /// Type identifier used when this error is reported in a failure response
    pub fn exception_name(&self) -> &str {
        match self {
            BridgeError::Decode(_) => "hostfetch.DecodeError",
            BridgeError::Encode(_) => "hostfetch.EncodeError",
            BridgeError::AllocationFailed { .. } | BridgeError::BufferSizeMismatch { .. } => {
                "hostfetch.AllocationError"
            }
            BridgeError::NotInstalled => "hostfetch.NotInstalled",
            BridgeError::UnknownHandle(_) => "hostfetch.UnknownHandle",
            BridgeError::Client(e) => e.name(),
            BridgeError::Panic(_) => "Panic",
            BridgeError::LibraryLoad(_) | BridgeError::SymbolNotFound(_) => {
                "hostfetch.NativeLibraryError"
            }
            BridgeError::Config(_) => "hostfetch.ConfigError",
            BridgeError::Runtime(_) => "hostfetch.RuntimeError",
        }
    }

    /// Message used when this error is reported in a failure response
    ///
    /// Client failures keep their original message untouched.
    pub fn exception_message(&self) -> String {
        match self {
            BridgeError::Client(e) => e.message().to_string(),
            BridgeError::Panic(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
