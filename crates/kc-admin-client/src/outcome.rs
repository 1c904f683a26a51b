//! Result of a creation call.

use kc_core::ApiResponse;
use serde_json::{json, Value};

/// Outcome of a creation call.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateResult {
    /// The server created the entity.
    Created {
        /// Last segment of the `Location` header, usually the new entity's id.
        id: Option<String>,
        /// Response body; empty for most endpoints.
        response: ApiResponse,
    },

    /// The server answered 409 and the caller asked to tolerate it.
    AlreadyExists,
}

impl CreateResult {
    /// Id of the created entity.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Created { id, .. } => id.as_deref(),
            Self::AlreadyExists => None,
        }
    }

    /// Returns whether this is the "already exists" sentinel.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }

    /// JSON rendering: the response body, else the id, else `null`.
    /// The sentinel renders as `{"msg": "Already exists"}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::AlreadyExists => json!({"msg": "Already exists"}),
            Self::Created {
                response: ApiResponse::Json(body),
                ..
            } => body.clone(),
            Self::Created { id: Some(id), .. } => Value::String(id.clone()),
            Self::Created { .. } => Value::Null,
        }
    }
}
