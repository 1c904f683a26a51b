//! The operation catalog, one module per admin console concept.
//!
//! Each operation fills a template from [`crate::urls`] and hands it to one of
//! the executor's request shapes: single document, single page, full listing,
//! creation, count, or plain verb call.

mod authentication;
mod authorization;
mod client_scopes;
mod clients;
mod groups;
mod identity_providers;
mod realms;
mod roles;
mod server;
mod users;

pub use groups::get_subgroups;
