//! User DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user, as created, read and updated through the admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    /// User id (assigned by the server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Username (unique within realm).
    pub username: String,
    /// Whether the user is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the email has been verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,
    /// Required actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_actions: Vec<String>,
    /// Credentials to set on creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<CredentialRepresentation>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserRepresentation {
    /// An enabled user with the given username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            enabled: Some(true),
            ..Self::default()
        }
    }
}

/// A credential, as sent to `reset-password` or with a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRepresentation {
    /// Credential type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Secret value.
    pub value: String,
    /// Whether the user must change it at next login.
    pub temporary: bool,
}

impl CredentialRepresentation {
    /// A password credential.
    #[must_use]
    pub fn password(value: impl Into<String>, temporary: bool) -> Self {
        Self {
            kind: "password".to_string(),
            value: value.into(),
            temporary,
        }
    }
}
