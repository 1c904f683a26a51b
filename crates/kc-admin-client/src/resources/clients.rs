//! Client operations.
//!
//! Clients are addressed by their internal id; use
//! [`KeycloakAdmin::get_client_id`] to resolve a protocol `clientId`.

use kc_core::{ApiResponse, HttpVerb, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    URL_ADMIN_CLIENT, URL_ADMIN_CLIENTS, URL_ADMIN_CLIENT_INSTALLATION_PROVIDER,
    URL_ADMIN_CLIENT_SECRETS, URL_ADMIN_CLIENT_SERVICE_ACCOUNT_USER,
};

impl KeycloakAdmin {
    /// Lists the realm's clients.
    pub async fn get_clients(&self) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENTS, &[])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Reads a client by internal id.
    pub async fn get_client(&self, client_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT, &[("id", client_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Resolves a protocol `clientId` to the client's internal id.
    pub async fn get_client_id(&self, client_id: &str) -> Result<Option<String>> {
        let path = self.path(URL_ADMIN_CLIENTS, &[])?;
        let clients = self
            .executor
            .get_list(&path, &Query::new().param("clientId", client_id))
            .await?;
        Ok(clients
            .iter()
            .find(|client| client.get("clientId").and_then(Value::as_str) == Some(client_id))
            .and_then(|client| client.get("id").and_then(Value::as_str))
            .map(str::to_string))
    }

    /// Creates a client.
    pub async fn create_client(&self, payload: &impl Serialize, skip_exists: bool) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENTS, &[])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Updates a client.
    pub async fn update_client(&self, client_id: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT, &[("id", client_id)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a client.
    pub async fn delete_client(&self, client_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT, &[("id", client_id)])?;
        self.executor.delete(&path, None).await
    }

    /// Reads a confidential client's secret.
    pub async fn get_client_secrets(&self, client_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_SECRETS, &[("id", client_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Generates a new secret for a confidential client.
    pub async fn generate_client_secrets(&self, client_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_SECRETS, &[("id", client_id)])?;
        self.executor
            .post(&path, &Query::new(), None)
            .await?
            .into_json()
    }

    /// The user backing a client's service account.
    pub async fn get_client_service_account_user(&self, client_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_SERVICE_ACCOUNT_USER, &[("id", client_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Installation file for a client, such as `keycloak-oidc-keycloak-json`.
    ///
    /// JSON providers come back parsed; XML providers as raw bytes.
    pub async fn get_client_installation_provider(
        &self,
        client_id: &str,
        provider_id: &str,
    ) -> Result<ApiResponse> {
        let path = self.path(
            URL_ADMIN_CLIENT_INSTALLATION_PROVIDER,
            &[("id", client_id), ("provider-id", provider_id)],
        )?;
        self.executor.send(HttpVerb::Get, &path, &Query::new(), None).await
    }
}
