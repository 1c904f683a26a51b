//! # kc-protocol-oidc
//!
//! Client side of Keycloak's `OpenID` Connect endpoints.
//!
//! The admin client authenticates through the token endpoint of the realm
//! its principal lives in:
//!
//! | Grant | Form parameters |
//! |-------|-----------------|
//! | `password` | `client_id`, `username`, `password`, `scope=openid`, `client_secret`?, `totp`? |
//! | `client_credentials` | `client_id`, `client_secret` |
//! | `refresh_token` | `client_id`, `refresh_token`, `client_secret`? |
//!
//! ## Modules
//!
//! - [`client`] - `OpenIdClient`, bound to one realm and client id
//! - [`error`] - OAuth 2.0 error bodies
//! - [`manager`] - `TokenManager`, owner of the Token Record
//! - [`token`] - token endpoint response types
//! - [`types`] - grant types, credentials and the refresh fallback policy

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod manager;
pub mod token;
pub mod types;

pub use client::OpenIdClient;
pub use error::ErrorResponse;
pub use manager::TokenManager;
pub use token::{IntrospectionResponse, TokenRecord};
pub use types::{Credentials, Grant, GrantType, RefreshFallback};
