//! Group operations.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::{json, Value};

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{
    URL_ADMIN_GROUP, URL_ADMIN_GROUPS, URL_ADMIN_GROUPS_COUNT, URL_ADMIN_GROUP_CHILDREN,
    URL_ADMIN_GROUP_MEMBERS, URL_ADMIN_GROUP_PERMISSIONS, URL_ADMIN_USER_GROUP,
};

fn group_path(group: &Value) -> Option<&str> {
    group.get("path").and_then(Value::as_str)
}

/// Searches the `subGroups` tree below `group` for the group at `path`.
///
/// Makes no request.
#[must_use]
pub fn get_subgroups(group: &Value, path: &str) -> Option<Value> {
    group
        .get("subGroups")
        .and_then(Value::as_array)?
        .iter()
        .find_map(|sub| {
            if group_path(sub) == Some(path) {
                Some(sub.clone())
            } else {
                get_subgroups(sub, path)
            }
        })
}

impl KeycloakAdmin {
    /// Lists groups matching `query`, every page unless bounded.
    pub async fn get_groups(&self, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_GROUPS, &[])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Counts groups matching `query`.
    pub async fn groups_count(&self, query: &Query) -> Result<u64> {
        let path = self.path(URL_ADMIN_GROUPS_COUNT, &[])?;
        self.executor.count(&path, query).await
    }

    /// Reads a group by id.
    pub async fn get_group(&self, group_id: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_GROUP, &[("id", group_id)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Direct children of a group, every page unless bounded.
    pub async fn get_group_children(&self, group_id: &str, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_GROUP_CHILDREN, &[("id", group_id)])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Creates a top-level group, or a child of `parent` when given.
    pub async fn create_group(
        &self,
        payload: &impl Serialize,
        parent: Option<&str>,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let path = match parent {
            Some(parent) => self.path(URL_ADMIN_GROUP_CHILDREN, &[("id", parent)])?,
            None => self.path(URL_ADMIN_GROUPS, &[])?,
        };
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, skip_exists)
            .await
    }

    /// Updates a group.
    pub async fn update_group(&self, group_id: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_GROUP, &[("id", group_id)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes a group and its subgroups.
    pub async fn delete_group(&self, group_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_GROUP, &[("id", group_id)])?;
        self.executor.delete(&path, None).await
    }

    /// Members of a group, every page unless bounded.
    pub async fn get_group_members(&self, group_id: &str, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_GROUP_MEMBERS, &[("id", group_id)])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Adds a user to a group.
    pub async fn group_user_add(&self, user_id: &str, group_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_GROUP, &[("id", user_id), ("group-id", group_id)])?;
        self.executor.put(&path, &Query::new(), None).await
    }

    /// Removes a user from a group.
    pub async fn group_user_remove(&self, user_id: &str, group_id: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_USER_GROUP, &[("id", user_id), ("group-id", group_id)])?;
        self.executor.delete(&path, None).await
    }

    /// Enables or disables fine-grained management permissions on a group.
    pub async fn group_set_permissions(&self, group_id: &str, enabled: bool) -> Result<Value> {
        let path = self.path(URL_ADMIN_GROUP_PERMISSIONS, &[("id", group_id)])?;
        self.executor
            .put(&path, &Query::new(), Some(&json!({ "enabled": enabled })))
            .await?
            .into_json()
    }

    /// Finds a group by its full path, such as `/parent/child`.
    ///
    /// Top-level groups are listed; with `search_in_subgroups` the `subGroups`
    /// tree of every group on the way is searched too. `None` when nothing matches.
    pub async fn get_group_by_path(&self, path: &str, search_in_subgroups: bool) -> Result<Option<Value>> {
        let groups = self.get_groups(&Query::new()).await?;
        for group in &groups {
            let Some(group_path) = group_path(group) else {
                continue;
            };
            if group_path == path {
                return Ok(Some(group.clone()));
            }
            let is_ancestor = path
                .strip_prefix(group_path)
                .is_some_and(|rest| rest.starts_with('/'));
            if search_in_subgroups && is_ancestor {
                if let Some(found) = get_subgroups(group, path) {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }
}
