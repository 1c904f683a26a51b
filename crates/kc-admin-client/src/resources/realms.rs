//! Realm operations.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    fill, URL_ADMIN_REALM, URL_ADMIN_REALMS, URL_ADMIN_REALM_PARTIAL_EXPORT,
    URL_ADMIN_REALM_PARTIAL_IMPORT,
};

impl KeycloakAdmin {
    /// Lists every realm visible to the principal.
    pub async fn get_realms(&self) -> Result<Vec<Value>> {
        self.executor
            .get_list(URL_ADMIN_REALMS, &Query::new())
            .await
    }

    /// Reads a realm by name.
    pub async fn get_realm(&self, realm_name: &str) -> Result<Value> {
        let path = fill(URL_ADMIN_REALM, &[("realm-name", realm_name)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Creates a realm. With `skip_exists`, an existing realm of the same name
    /// yields [`CreateResult::AlreadyExists`].
    pub async fn create_realm(&self, payload: &impl Serialize, skip_exists: bool) -> Result<CreateResult> {
        self.executor
            .create(URL_ADMIN_REALMS, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Imports a full realm representation.
    pub async fn import_realm(&self, payload: &impl Serialize) -> Result<CreateResult> {
        self.executor
            .create(URL_ADMIN_REALMS, &Query::new(), &to_payload(payload)?, false)
            .await
    }

    /// Updates a realm.
    pub async fn update_realm(&self, realm_name: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = fill(URL_ADMIN_REALM, &[("realm-name", realm_name)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a realm.
    pub async fn delete_realm(&self, realm_name: &str) -> Result<ApiResponse> {
        let path = fill(URL_ADMIN_REALM, &[("realm-name", realm_name)])?;
        self.executor.delete(&path, None).await
    }

    /// Exports the administered realm, optionally with clients and with groups and roles.
    pub async fn export_realm(&self, export_clients: bool, export_groups_and_roles: bool) -> Result<Value> {
        let path = self.path(URL_ADMIN_REALM_PARTIAL_EXPORT, &[])?;
        let query = Query::new()
            .param("exportClients", export_clients)
            .param("exportGroupsAndRoles", export_groups_and_roles);
        self.executor.post(&path, &query, None).await?.into_json()
    }

    /// Imports users, clients, groups, roles and identity providers into an existing realm.
    pub async fn partial_import_realm(&self, realm_name: &str, payload: &impl Serialize) -> Result<Value> {
        let path = fill(URL_ADMIN_REALM_PARTIAL_IMPORT, &[("realm-name", realm_name)])?;
        self.executor
            .post(&path, &Query::new(), Some(&to_payload(payload)?))
            .await?
            .into_json()
    }
}
