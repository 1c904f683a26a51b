//! Token Manager: acquires, holds and refreshes the administrative bearer token.
//!
//! Refresh is reactive. Nothing here looks at `expires_in`; the caller asks
//! for a refresh after observing a 401.

use kc_core::{Error, Result};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::client::OpenIdClient;
use crate::token::TokenRecord;
use crate::types::{Credentials, Grant};

/// Owner of the Token Record.
#[derive(Debug)]
pub struct TokenManager {
    client: OpenIdClient,
    credentials: Credentials,
    token: RwLock<Option<TokenRecord>>,
}

impl TokenManager {
    /// Creates a manager holding no token yet.
    #[must_use]
    pub fn new(client: OpenIdClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            token: RwLock::new(None),
        }
    }

    /// Starts from a pre-supplied token.
    #[must_use]
    pub fn with_token(self, token: TokenRecord) -> Self {
        *self.token.write() = Some(token);
        self
    }

    /// The OIDC client tokens are requested through.
    #[must_use]
    pub const fn client(&self) -> &OpenIdClient {
        &self.client
    }

    /// Stored credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns whether a full acquire is possible.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Acquires a token for the principal in `realm` with the stored credentials.
    ///
    /// Without credentials nothing is requested and the current token, if any,
    /// is returned unchanged.
    pub async fn acquire(&self, realm: &str) -> Result<Option<TokenRecord>> {
        let Some(grant) = self.credentials.grant() else {
            debug!(realm = %realm, "no credentials configured, keeping current token");
            return Ok(self.token());
        };
        let record = self.client.request_token(realm, &grant).await?;
        info!(realm = %realm, grant = %grant.grant_type(), "token acquired");
        self.store(record.clone());
        Ok(Some(record))
    }

    /// Exchanges the held refresh token for a new Token Record.
    ///
    /// With no refresh token held this is a full [`TokenManager::acquire`], or
    /// an authentication error when there are no credentials either: the held
    /// token is never handed back as if it were new. A rejected refresh grant
    /// is returned as is; falling back to a full acquire is the caller's decision.
    pub async fn refresh(&self, realm: &str) -> Result<TokenRecord> {
        let refresh_token = self
            .token
            .read()
            .as_ref()
            .filter(|token| token.has_refresh_token())
            .and_then(|token| token.refresh_token.clone());

        let Some(refresh_token) = refresh_token else {
            if !self.has_credentials() {
                return Err(Error::authentication(
                    401,
                    "no refresh token held and no credentials to acquire a new token",
                ));
            }
            debug!(realm = %realm, "no refresh token held, acquiring a new token");
            return self.acquire(realm).await?.ok_or_else(|| {
                Error::authentication(401, "credentials produced no token")
            });
        };

        let record = self
            .client
            .request_token(realm, &Grant::RefreshToken(refresh_token))
            .await?;
        debug!(realm = %realm, "token refreshed");
        self.store(record.clone());
        Ok(record)
    }

    /// Snapshot of the Token Record.
    #[must_use]
    pub fn token(&self) -> Option<TokenRecord> {
        self.token.read().clone()
    }

    /// Current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .map(|token| token.access_token.clone())
    }

    /// Replaces the Token Record.
    pub fn set_token(&self, token: Option<TokenRecord>) {
        *self.token.write() = token;
    }

    /// Drops the refresh token so the next refresh performs a full acquire.
    pub fn strip_refresh_token(&self) {
        if let Some(token) = self.token.write().as_mut() {
            token.refresh_token = None;
            token.refresh_expires_in = None;
        }
    }

    fn store(&self, record: TokenRecord) {
        *self.token.write() = Some(record);
    }
}
