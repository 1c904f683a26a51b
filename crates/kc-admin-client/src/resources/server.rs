//! Server information and realm event logs.

use kc_core::{Query, Result};
use serde_json::Value;

use crate::admin::KeycloakAdmin;
use crate::urls::{URL_ADMIN_ADMIN_EVENTS, URL_ADMIN_EVENTS, URL_SERVER_INFO};

impl KeycloakAdmin {
    /// Server version, providers, themes and memory.
    pub async fn get_server_info(&self) -> Result<Value> {
        self.executor
            .get_json(URL_SERVER_INFO, &Query::new())
            .await
    }

    /// User events of the administered realm, every page unless bounded.
    pub async fn get_events(&self, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_EVENTS, &[])?;
        self.executor.fetch_all(&path, query).await
    }

    /// Admin events of the administered realm, every page unless bounded.
    pub async fn get_admin_events(&self, query: &Query) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_ADMIN_EVENTS, &[])?;
        self.executor.fetch_all(&path, query).await
    }
}
