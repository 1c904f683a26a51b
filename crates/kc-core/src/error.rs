//! Error handling for the Keycloak admin client.
//!
//! Server rejections keep the numeric status and the raw response body so
//! callers can match on Keycloak's own error codes and messages. The variant
//! tells which HTTP verb initiated the rejected call.

use bytes::Bytes;
use thiserror::Error;

use crate::verb::HttpVerb;

/// Result type alias using the admin client error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by admin and token operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad credentials, a rejected grant, or a 401 that could not be refreshed away.
    #[error("{status}: {}", String::from_utf8_lossy(body))]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// A GET request was rejected by the server.
    #[error("{status}: {}", String::from_utf8_lossy(body))]
    Get {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// A POST request was rejected by the server.
    #[error("{status}: {}", String::from_utf8_lossy(body))]
    Post {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// A PUT request was rejected by the server.
    #[error("{status}: {}", String::from_utf8_lossy(body))]
    Put {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// A DELETE request was rejected by the server.
    #[error("{status}: {}", String::from_utf8_lossy(body))]
    Delete {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// Invalid local configuration, detected before any network activity.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network or transport failure. Never retried by this library.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A URL could not be built from the server URL and a path.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A successful response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Builds the rejection error matching the verb that initiated the call.
    #[must_use]
    pub fn for_verb(verb: HttpVerb, status: u16, body: Bytes) -> Self {
        match verb {
            HttpVerb::Get => Self::Get { status, body },
            HttpVerb::Post => Self::Post { status, body },
            HttpVerb::Put => Self::Put { status, body },
            HttpVerb::Delete => Self::Delete { status, body },
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(status: u16, body: impl Into<Bytes>) -> Self {
        Self::Authentication {
            status,
            body: body.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns the HTTP status carried by a server rejection.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Get { status, .. }
            | Self::Post { status, .. }
            | Self::Put { status, .. }
            | Self::Delete { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw body carried by a server rejection.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Authentication { body, .. }
            | Self::Get { body, .. }
            | Self::Post { body, .. }
            | Self::Put { body, .. }
            | Self::Delete { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the body as text, if this error carries one.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        self.body()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }

    /// Returns whether the server answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns whether the server answered 409.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409))
    }

    /// Returns whether this is an authentication failure.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
