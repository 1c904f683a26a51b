//! # kc-admin-client
//!
//! Realm-scoped client for the Keycloak admin REST API.
//!
//! A [`KeycloakAdmin`] holds one administrative session: a connection to the
//! server, the principal's credentials and the current Token Record. Every
//! operation is executed by the [`RequestExecutor`], which refreshes the token
//! and retries once on `401` for the verbs listed in the Auto-Refresh Set.
//!
//! ## Endpoints
//!
//! | Area | Path below `admin/realms/{realm}` |
//! |------|-----------------------------------|
//! | Realms | `/`, `/partialImport`, `/partial-export` |
//! | Users | `/users`, `/users/count`, `/users/{id}/...` |
//! | Groups | `/groups`, `/groups/{id}/children`, `/groups/{id}/members` |
//! | Clients | `/clients`, `/clients/{id}/client-secret`, `/clients/{id}/roles` |
//! | Roles | `/roles`, `/roles/{name}/users`, `/users/{id}/role-mappings/...` |
//! | Client scopes | `/client-scopes` |
//! | Identity providers | `/identity-provider/instances` |
//! | Authentication | `/authentication/flows`, `/authentication/required-actions` |
//! | Authorization | `/clients/{id}/authz/resource-server/...` |
//! | Events | `/events`, `/admin-events` |
//!
//! ## Modules
//!
//! - [`admin`] - the facade and its realm scope
//! - [`config`] - configuration from code, TOML or the environment
//! - [`dto`] - typed payloads for common representations
//! - [`executor`] - refresh-and-retry, classification and pagination
//! - [`outcome`] - result of creation calls
//! - [`refresh`] - the Auto-Refresh Set
//! - [`urls`] - path templates

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod admin;
pub mod config;
pub mod dto;
pub mod executor;
pub mod outcome;
pub mod refresh;
mod resources;
pub mod urls;

pub use admin::KeycloakAdmin;
pub use config::AdminConfig;
pub use executor::RequestExecutor;
pub use outcome::CreateResult;
pub use refresh::AutoRefreshSet;
pub use resources::get_subgroups;

pub use kc_core::{ApiResponse, ConnectionConfig, Error, HttpVerb, Query, Result};
pub use kc_protocol_oidc::{Credentials, RefreshFallback, TokenRecord};
