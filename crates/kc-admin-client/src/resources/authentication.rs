//! Authentication flows, executions and required actions.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::{json, Value};

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    URL_ADMIN_FLOW, URL_ADMIN_FLOWS, URL_ADMIN_FLOW_COPY, URL_ADMIN_FLOW_EXECUTION,
    URL_ADMIN_FLOW_EXECUTIONS, URL_ADMIN_FLOW_SUBFLOW, URL_ADMIN_REQUIRED_ACTION,
    URL_ADMIN_REQUIRED_ACTIONS,
};

impl KeycloakAdmin {
    /// Lists top-level authentication flows.
    pub async fn get_authentication_flows(&self) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_FLOWS, &[])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Reads a flow by id.
    pub async fn get_authentication_flow_for_id(&self, flow_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_FLOW, &[("id", flow_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Creates a top-level flow.
    pub async fn create_authentication_flow(&self, payload: &impl Serialize, skip_exists: bool) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_FLOWS, &[])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Copies the flow `flow_alias` under `new_name`.
    pub async fn copy_authentication_flow(&self, flow_alias: &str, new_name: &str) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_FLOW_COPY, &[("flow-alias", flow_alias)])?;
        self.executor
            .create(&path, &Query::new(), &json!({ "newName": new_name }), false)
            .await
    }

    /// Deletes a flow by id.
    pub async fn delete_authentication_flow(&self, flow_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_FLOW, &[("id", flow_id)])?;
        self.executor.delete(&path, None).await
    }

    /// Executions of a flow, nested subflows flattened by the server.
    pub async fn get_authentication_flow_executions(&self, flow_alias: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_FLOW_EXECUTIONS, &[("flow-alias", flow_alias)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Updates one execution of a flow, for example its requirement.
    pub async fn update_authentication_flow_executions(
        &self,
        flow_alias: &str,
        payload: &impl Serialize,
    ) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_FLOW_EXECUTIONS, &[("flow-alias", flow_alias)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Adds an authenticator execution to a flow.
    pub async fn create_authentication_flow_execution(
        &self,
        flow_alias: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_FLOW_EXECUTION, &[("flow-alias", flow_alias)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Adds a subflow to a flow.
    pub async fn create_authentication_flow_subflow(
        &self,
        flow_alias: &str,
        payload: &impl Serialize,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_FLOW_SUBFLOW, &[("flow-alias", flow_alias)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Lists required actions.
    pub async fn get_required_actions(&self) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_REQUIRED_ACTIONS, &[])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Finds a required action by alias.
    pub async fn get_required_action_by_alias(&self, action_alias: &str) -> Result<Option<Value>> {
        let actions = self.get_required_actions().await?;
        Ok(actions
            .into_iter()
            .find(|action| action.get("alias").and_then(Value::as_str) == Some(action_alias)))
    }

    /// Updates a required action.
    pub async fn update_required_action(&self, action_alias: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_REQUIRED_ACTION, &[("action-alias", action_alias)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }
}
