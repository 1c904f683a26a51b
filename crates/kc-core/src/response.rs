//! Response envelopes and success-body classification.

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::verb::HttpVerb;

/// Raw outcome of one HTTP call: status, headers and body bytes.
///
/// Produced for every status code; turning a non-2xx status into an error is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Bytes,
}

impl ResponseEnvelope {
    /// Creates an envelope.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Numeric status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns whether the content type announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"))
    }

    /// Last path segment of the `Location` header, which Keycloak sets to the
    /// URL of a newly created entity.
    #[must_use]
    pub fn location_id(&self) -> Option<String> {
        let location = self.headers.get(LOCATION)?.to_str().ok()?;
        location
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                urlencoding::decode(segment)
                    .map_or_else(|_| segment.to_string(), |s| s.into_owned())
            })
    }

    /// Converts the envelope into a success body, or the rejection error of `verb`.
    pub fn into_result(self, verb: HttpVerb) -> Result<ApiResponse> {
        if self.is_success() {
            Ok(ApiResponse::from_envelope(self))
        } else {
            Err(Error::for_verb(verb, self.status_code(), self.body))
        }
    }
}

/// A classified 2xx body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// A JSON document.
    Json(Value),
    /// Raw bytes. Empty for the many endpoints that answer with no content.
    Raw(Bytes),
}

impl ApiResponse {
    /// Classifies a successful envelope by its content type.
    ///
    /// A JSON content type with an unparseable body degrades to raw bytes.
    #[must_use]
    pub fn from_envelope(envelope: ResponseEnvelope) -> Self {
        if envelope.is_json() && !envelope.body.is_empty() {
            if let Ok(value) = serde_json::from_slice(&envelope.body) {
                return Self::Json(value);
            }
        }
        Self::Raw(envelope.body)
    }

    /// Returns whether the server sent no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Raw(bytes) if bytes.is_empty())
    }

    /// Returns the JSON document, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Converts into a JSON value.
    ///
    /// Raw bodies are parsed if possible; an empty body becomes `null`.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Raw(bytes) if bytes.is_empty() => Ok(Value::Null),
            Self::Raw(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    /// Converts into a list of records, failing if the body is not a JSON array.
    pub fn into_list(self) -> Result<Vec<Value>> {
        match self.into_json()? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::UnexpectedResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the raw bytes, re-encoding JSON bodies.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Self::Raw(bytes) => Ok(bytes),
            Self::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
