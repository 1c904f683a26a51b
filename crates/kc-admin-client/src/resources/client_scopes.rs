//! Client scope operations.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{URL_ADMIN_CLIENT_SCOPE, URL_ADMIN_CLIENT_SCOPES};

impl KeycloakAdmin {
    /// Lists the realm's client scopes.
    pub async fn get_client_scopes(&self) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_SCOPES, &[])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Reads a client scope by id.
    pub async fn get_client_scope(&self, scope_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_SCOPE, &[("scope-id", scope_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Finds a client scope by name.
    pub async fn get_client_scope_by_name(&self, name: &str) -> Result<Option<Value>> {
        let scopes = self.get_client_scopes().await?;
        Ok(scopes
            .into_iter()
            .find(|scope| scope.get("name").and_then(Value::as_str) == Some(name)))
    }

    /// Creates a client scope.
    pub async fn create_client_scope(&self, payload: &impl Serialize, skip_exists: bool) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_SCOPES, &[])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Updates a client scope.
    pub async fn update_client_scope(&self, scope_id: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT_SCOPE, &[("scope-id", scope_id)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a client scope.
    pub async fn delete_client_scope(&self, scope_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT_SCOPE, &[("scope-id", scope_id)])?;
        self.executor.delete(&path, None).await
    }
}
