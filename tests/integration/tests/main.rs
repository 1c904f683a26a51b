//! End-to-end tests of the admin client.
//!
//! Each test runs against its own mock server that plays the token endpoint
//! and whatever admin resources the test needs. Fixtures live in the
//! `kc_integration_tests` library.

mod auto_refresh;
mod creation;
mod errors;
mod lookups;
mod pagination;
mod token_acquisition;
