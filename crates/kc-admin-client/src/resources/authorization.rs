//! Authorization services of a client: resources, scopes, policies and permissions.
//!
//! Every path is below the client's resource server; `client_id` is the
//! client's internal id.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    URL_ADMIN_CLIENT_AUTHZ_PERMISSIONS, URL_ADMIN_CLIENT_AUTHZ_POLICIES,
    URL_ADMIN_CLIENT_AUTHZ_POLICY, URL_ADMIN_CLIENT_AUTHZ_RESOURCE,
    URL_ADMIN_CLIENT_AUTHZ_RESOURCES, URL_ADMIN_CLIENT_AUTHZ_RESOURCE_BASED_PERMISSION,
    URL_ADMIN_CLIENT_AUTHZ_ROLE_BASED_POLICY, URL_ADMIN_CLIENT_AUTHZ_SCOPES,
    URL_ADMIN_CLIENT_AUTHZ_SETTINGS,
};

impl KeycloakAdmin {
    /// Resource server settings.
    pub async fn get_client_authz_settings(&self, client_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_SETTINGS, &[("id", client_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Lists protected resources.
    pub async fn get_client_authz_resources(&self, client_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_RESOURCES, &[("id", client_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Creates a protected resource. The body of the result is the new resource.
    pub async fn create_client_authz_resource(
        &self,
        client_id: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_RESOURCES, &[("id", client_id)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Deletes a protected resource.
    pub async fn delete_client_authz_resource(&self, client_id: &str, resource_id: &str) -> Result<ApiResponse> {
        let path = self.path(
            URL_ADMIN_CLIENT_AUTHZ_RESOURCE,
            &[("id", client_id), ("resource-id", resource_id)],
        )?;
        self.executor.delete(&path, None).await
    }

    /// Lists authorization scopes.
    pub async fn get_client_authz_scopes(&self, client_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_SCOPES, &[("id", client_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Creates an authorization scope.
    pub async fn create_client_authz_scopes(
        &self,
        client_id: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_SCOPES, &[("id", client_id)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Lists policies, permissions included.
    pub async fn get_client_authz_policies(&self, client_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_POLICIES, &[("id", client_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Creates a role-based policy.
    pub async fn create_client_authz_role_based_policy(
        &self,
        client_id: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_ROLE_BASED_POLICY, &[("id", client_id)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Creates a resource-based permission.
    pub async fn create_client_authz_resource_based_permission(
        &self,
        client_id: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_RESOURCE_BASED_PERMISSION, &[("id", client_id)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Lists permissions.
    pub async fn get_client_authz_permissions(&self, client_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_AUTHZ_PERMISSIONS, &[("id", client_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Deletes a policy or permission.
    pub async fn delete_client_authz_policy(&self, client_id: &str, policy_id: &str) -> Result<ApiResponse> {
        let path = self.path(
            URL_ADMIN_CLIENT_AUTHZ_POLICY,
            &[("id", client_id), ("policy-id", policy_id)],
        )?;
        self.executor.delete(&path, None).await
    }
}
