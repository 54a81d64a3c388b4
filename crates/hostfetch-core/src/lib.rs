//! hostfetch-core - Wire messages, host client capability, and request translation
//!
//! This crate provides the foundational types for the hostfetch bridge:
//! - [`Request`] and [`Response`] wire messages exchanged with the native core
//! - [`HttpClient`] capability implemented by the host application
//! - [`translate`] for mapping a decoded [`Request`] onto a [`HostRequest`]
//! - [`BodyStream`] zero-copy reader over a decoded request body
//! - [`BridgeError`] and [`ClientError`] for error handling
//! - [`BridgeConfig`] for bridge configuration

mod body;
mod client;
mod config;
mod error;
mod headers;
mod message;
mod translate;

pub use body::BodyStream;
pub use client::{CookiePolicy, HostRequest, HostResponse, HttpClient, HttpMethod, Redirect};
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult, ClientError};
pub use headers::{Header, Headers};
pub use message::{Method, Request, Response};
pub use translate::translate;

/// Log levels for FFI callbacks
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(BridgeError::Config(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BodyStream, BridgeConfig, BridgeError, BridgeResult, ClientError, CookiePolicy, Headers,
        HostRequest, HostResponse, HttpClient, HttpMethod, LogLevel, Method, Redirect, Request,
        Response,
    };
}
