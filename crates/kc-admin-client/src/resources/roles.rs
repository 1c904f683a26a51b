//! Realm roles, client roles and user role mappings.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    URL_ADMIN_CLIENT_ROLE, URL_ADMIN_CLIENT_ROLES, URL_ADMIN_REALM_ROLE, URL_ADMIN_REALM_ROLES,
    URL_ADMIN_REALM_ROLE_MEMBERS, URL_ADMIN_USER_CLIENT_ROLES, URL_ADMIN_USER_REALM_ROLES,
    URL_ADMIN_USER_REALM_ROLES_COMPOSITE,
};

impl KeycloakAdmin {
    /// Lists realm roles. `query` may carry `search` and `briefRepresentation`.
    pub async fn get_realm_roles(&self, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_REALM_ROLES, &[])?;
        self.executor.get_list(&path, query).await
    }

    /// Reads a realm role by name.
    pub async fn get_realm_role(&self, role_name: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_REALM_ROLE, &[("role-name", role_name)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Creates a realm role.
    pub async fn create_realm_role(&self, payload: &impl Serialize, skip_exists: bool) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_REALM_ROLES, &[])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Updates a realm role.
    pub async fn update_realm_role(&self, role_name: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_REALM_ROLE, &[("role-name", role_name)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a realm role.
    pub async fn delete_realm_role(&self, role_name: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_REALM_ROLE, &[("role-name", role_name)])?;
        self.executor.delete(&path, None).await
    }

    /// Users holding a realm role, every page unless bounded.
    pub async fn get_realm_role_members(&self, role_name: &str, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_REALM_ROLE_MEMBERS, &[("role-name", role_name)])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Grants realm roles to a user. `roles` is a list of role representations.
    pub async fn assign_realm_roles(&self, user_id: &str, roles: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_REALM_ROLES, &[("id", user_id)])?;
        self.executor
            .post(&path, &Query::new(), Some(&to_payload(roles)?))
            .await
    }

    /// Realm roles mapped directly to a user.
    pub async fn get_realm_roles_of_user(&self, user_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_REALM_ROLES, &[("id", user_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Removes realm role mappings from a user.
    pub async fn delete_realm_roles_of_user(&self, user_id: &str, roles: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_REALM_ROLES, &[("id", user_id)])?;
        self.executor.delete(&path, Some(&to_payload(roles)?)).await
    }

    /// Effective realm roles of a user, composites expanded.
    pub async fn get_composite_realm_roles_of_user(
        &self,
        user_id: &str,
        brief_representation: bool,
    ) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_REALM_ROLES_COMPOSITE, &[("id", user_id)])?;
        let query = Query::new().param("briefRepresentation", brief_representation);
        self.executor.get_list(&path, &query).await
    }

    /// Lists the roles of a client.
    pub async fn get_client_roles(&self, client_id: &str, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_CLIENT_ROLES, &[("id", client_id)])?;
        self.executor.get_list(&path, query).await
    }

    /// Reads a client role by name.
    pub async fn get_client_role(&self, client_id: &str, role_name: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_CLIENT_ROLE, &[("id", client_id), ("role-name", role_name)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Creates a client role.
    pub async fn create_client_role(
        &self,
        client_id: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_CLIENT_ROLES, &[("id", client_id)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Updates a client role.
    pub async fn update_client_role(
        &self,
        client_id: &str,
        role_name: &str,
        payload: &impl Serialize,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT_ROLE, &[("id", client_id), ("role-name", role_name)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a client role.
    pub async fn delete_client_role(&self, client_id: &str, role_name: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_CLIENT_ROLE, &[("id", client_id), ("role-name", role_name)])?;
        self.executor.delete(&path, None).await
    }

    /// Grants client roles to a user.
    pub async fn assign_client_role(
        &self,
        user_id: &str,
        client_id: &str,
        roles: &impl Serialize,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_CLIENT_ROLES, &[("id", user_id), ("client-id", client_id)])?;
        self.executor
            .post(&path, &Query::new(), Some(&to_payload(roles)?))
            .await
    }

    /// Client roles of one client mapped directly to a user.
    pub async fn get_client_roles_of_user(&self, user_id: &str, client_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_CLIENT_ROLES, &[("id", user_id), ("client-id", client_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Removes client role mappings from a user.
    pub async fn delete_client_roles_of_user(
        &self,
        user_id: &str,
        client_id: &str,
        roles: &impl Serialize,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_CLIENT_ROLES, &[("id", user_id), ("client-id", client_id)])?;
        self.executor.delete(&path, Some(&to_payload(roles)?)).await
    }
}
