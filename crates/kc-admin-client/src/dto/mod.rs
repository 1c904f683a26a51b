//! Typed representations of common admin API payloads.
//!
//! Every operation takes any `Serialize` payload, so these are a convenience
//! over raw JSON. Fields Keycloak returns that are not modelled here are kept
//! in the flattened `other` map and survive a read-modify-write cycle.

pub mod client;
pub mod group;
pub mod realm;
pub mod role;
pub mod user;

pub use client::ClientRepresentation;
pub use group::GroupRepresentation;
pub use realm::RealmRepresentation;
pub use role::RoleRepresentation;
pub use user::{CredentialRepresentation, UserRepresentation};
