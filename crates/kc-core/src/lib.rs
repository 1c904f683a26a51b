//! # kc-core
//!
//! Core plumbing shared by the Keycloak admin client crates.
//!
//! This crate owns everything below the token lifecycle:
//!
//! - [`config`] - connection configuration (server URL, TLS verification, timeout, headers)
//! - [`connection`] - one authenticated HTTP call, returned as a raw envelope
//! - [`error`] - the error taxonomy every operation fails with
//! - [`query`] - query-string builder understood by the admin REST API
//! - [`response`] - response envelopes and success-body classification
//! - [`verb`] - the four HTTP verbs the admin API is driven with

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod connection;
pub mod error;
pub mod query;
pub mod response;
pub mod verb;

pub use config::ConnectionConfig;
pub use connection::Connection;
pub use error::{Error, Result};
pub use query::Query;
pub use response::{ApiResponse, ResponseEnvelope};
pub use verb::HttpVerb;
