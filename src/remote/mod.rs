//! Remote source access.
//!
//! Everything that talks to the upstream repository goes through the
//! [`RemoteSource`] trait so runs can be pointed at an in-memory fake.
//! [`HttpRemote`] is the real implementation.

mod http;

pub mod fetch;
pub mod manifest;
pub mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpRemote;

use thiserror::Error;

/// Failure of a single remote request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request never produced a response (DNS, connect, read...).
    #[error("{0}")]
    Transport(String),
}

/// Blocking access to the remote source.
pub trait RemoteSource {
    /// Fetches the full body of `url`. Non-2xx statuses are errors.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// Issues a HEAD request and returns the response status.
    fn head_status(&self, url: &str) -> Result<u16, TransportError>;
}

impl<T: RemoteSource + ?Sized> RemoteSource for &T {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        (**self).get_bytes(url)
    }

    fn head_status(&self, url: &str) -> Result<u16, TransportError> {
        (**self).head_status(url)
    }
}
