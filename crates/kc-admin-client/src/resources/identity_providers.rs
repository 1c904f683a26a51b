//! Identity provider operations. Providers are addressed by alias.

use kc_core::{ApiResponse, Query, Result};
use serde::Serialize;
use serde_json::Value;

use crate::admin::{to_payload, KeycloakAdmin};
use crate::outcome::CreateResult;
use crate::urls::{URL_ADMIN_IDP, URL_ADMIN_IDPS, URL_ADMIN_IDP_MAPPERS};

impl KeycloakAdmin {
    /// Lists identity providers.
    pub async fn get_idps(&self) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_IDPS, &[])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Reads an identity provider.
    pub async fn get_idp(&self, alias: &str) -> Result<Value> {
        let path = self.path(URL_ADMIN_IDP, &[("alias", alias)])?;
        self.executor.get_json(&path, &Query::new()).await
    }

    /// Creates an identity provider.
    pub async fn create_idp(&self, payload: &impl Serialize) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_IDPS, &[])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, false)
            .await
    }

    /// Updates an identity provider.
    pub async fn update_idp(&self, alias: &str, payload: &impl Serialize) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_IDP, &[("alias", alias)])?;
        self.executor
            .put(&path, &Query::new(), Some(&to_payload(payload)?))
            .await
    }

    /// Deletes an identity provider.
    pub async fn delete_idp(&self, alias: &str) -> Result<ApiResponse> {
        let path = self.path(URL_ADMIN_IDP, &[("alias", alias)])?;
        self.executor.delete(&path, None).await
    }

    /// Mappers attached to an identity provider.
    pub async fn get_idp_mappers(&self, alias: &str) -> Result<Vec<Value>> {
        let path = self.path(URL_ADMIN_IDP_MAPPERS, &[("alias", alias)])?;
        self.executor.get_list(&path, &Query::new()).await
    }

    /// Attaches a mapper to an identity provider.
    pub async fn add_mapper_to_idp(&self, alias: &str, payload: &impl Serialize) -> Result<CreateResult> {
        let path = self.path(URL_ADMIN_IDP_MAPPERS, &[("alias", alias)])?;
        self.executor
            .create(&path, &Query::new(), &to_payload(payload)?, false)
            .await
    }
}
