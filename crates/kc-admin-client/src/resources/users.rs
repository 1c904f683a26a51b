//! User operations.

use kc_core::{ApiResponse, Error, Query, Result};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::dto::CredentialRepresentation;
use crate::urls::{
    URL_ADMIN_SEND_UPDATE_ACCOUNT, URL_ADMIN_SEND_VERIFY_EMAIL, URL_ADMIN_USER,
    URL_ADMIN_USERS, URL_ADMIN_USERS_COUNT, URL_ADMIN_USER_CONSENTS, URL_ADMIN_USER_CREDENTIAL,
    URL_ADMIN_USER_CREDENTIALS, URL_ADMIN_USER_GROUPS, URL_ADMIN_USER_LOGOUT,
    URL_ADMIN_USER_RESET_PASSWORD, URL_ADMIN_USER_SESSIONS,
};

impl KeycloakAdmin {
    /// Lists users matching `query`, every page unless `first` or `max` is given.
    pub async fn get_users(&self, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USERS, &[])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Counts users matching `query`.
    pub async fn users_count(&self, query: &Query) -> Result<u64> {
        let path = self.path(URL_ADMIN_USERS_COUNT, &[])?;
        self.executor.count(&path, query).await
    }

    /// Reads a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_USER, &[("id", user_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Finds a user's id by username. `None` when no user matches.
    pub async fn get_user_id(&self, username: &str) -> Result<Option<String>> {
        let path = self.path(URL_ADMIN_USERS, &[])?;
        let query = Query::new().param("username", username).param("exact", true);
        let users = self.executor.get_list(&path, &query).await?;
        Ok(users
            .iter()
            .find(|user| {
                user.get("username")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.eq_ignore_ascii_case(username))
            })
            .and_then(|user| user.get("id").and_then(Value::as_str))
            .map(str::to_string))
    }

    /// Creates a user and returns its id.
    ///
    /// With `exist_ok`, a user with the same username is looked up first and
    /// its id returned instead.
    pub async fn create_user(&self, payload: &impl Serialize, exist_ok: bool) -> Result<String> {
        let payload = to_payload(payload)?;
        if exist_ok {
            let username = payload
                .get("username")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::configuration("user payload has no username"))?;
            if let Some(id) = self.get_user_id(username).await? {
                debug!(username, "user already exists");
                return Ok(id);
            }
        }

        let path = self.path(URL_ADMIN_USERS, &[])?;
        let created = self
            .executor
            .create(&path, &Query::new(), &payload, false)
            .await?;
        created
            .id()
            .map(str::to_string)
            .ok_or_else(|| Error::UnexpectedResponse("user created without a Location header".to_string()))
    }

    /// Updates a user.
    pub async fn update_user(&self, user_id: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER, &[("id", user_id)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER, &[("id", user_id)])?;
        self.executor.delete(&path, None).await
    }

    /// Sets a user's password.
    pub async fn set_user_password(&self, user_id: &str, password: &str, temporary: bool) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_RESET_PASSWORD, &[("id", user_id)])?;
        let credential = CredentialRepresentation::password(password, temporary);
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(&credential)?))
            .await
    }

    /// Groups the user belongs to, every page unless bounded.
    pub async fn get_user_groups(&self, user_id: &str, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_GROUPS, &[("id", user_id)])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Ends every session of the user.
    pub async fn user_logout(&self, user_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_LOGOUT, &[("id", user_id)])?;
        self.executor.post(&path, &Query::new(), Some(&json!({}))).await
    }

    /// Consents the user has granted to clients.
    pub async fn user_consents(&self, user_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_CONSENTS, &[("id", user_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Active sessions of the user.
    pub async fn get_sessions(&self, user_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_SESSIONS, &[("id", user_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Credentials stored for the user.
    pub async fn get_credentials(&self, user_id: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_USER_CREDENTIALS, &[("id", user_id)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Removes one credential of the user.
    pub async fn delete_credential(&self, user_id: &str, credential_id: &str) -> Result<ApiResponse> {
        let path = self.path(
            URL_ADMIN_USER_CREDENTIAL,
            &[("id", user_id), ("credential-id", credential_id)],
        )?;
        self.executor.delete(&path, None).await
    }

    /// Sends the email-verification mail.
    pub async fn send_verify_email(
        &self,
        user_id: &str,
        client_id: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_SEND_VERIFY_EMAIL, &[("id", user_id)])?;
        let query = Query::new()
            .param_opt("client_id", client_id)
            .param_opt("redirect_uri", redirect_uri);
        self.executor.put(&path, &query, None).await
    }

    /// Sends a mail asking the user to perform `actions`, such as `UPDATE_PASSWORD`.
    pub async fn send_update_account(
        &self,
        user_id: &str,
        actions: &[&str],
        lifespan_secs: Option<u64>,
        client_id: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_SEND_UPDATE_ACCOUNT, &[("id", user_id)])?;
        let query = Query::new()
            .param_opt("lifespan", lifespan_secs)
            .param_opt("client_id", client_id)
            .param_opt("redirect_uri", redirect_uri);
        self.executor
            .put(&path, &query, Some(&json!(actions)))
            .await
    }
}
