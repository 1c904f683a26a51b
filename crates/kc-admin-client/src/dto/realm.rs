//! Realm DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A realm, as created, read and updated through the admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    /// Realm id; equal to the name for realms created through the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Realm name (unique).
    pub realm: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether users can self-register.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_allowed: Option<bool>,
    /// Access token lifespan in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_lifespan: Option<i32>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl RealmRepresentation {
    /// An enabled realm with the given name.
    #[must_use]
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            enabled: Some(true),
            ..Self::default()
        }
    }
}
