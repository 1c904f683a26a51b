//! The Admin Facade.

use kc_core::{Connection, Error, Result};
use kc_protocol_oidc::{OpenIdClient, TokenManager, TokenRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::AdminConfig;
use crate::executor::RequestExecutor;
use crate::refresh::AutoRefreshSet;
use crate::urls;

/// Realm-scoped entry point to the admin REST API.
///
/// One value per administrative session. Operations take `&self`; changing
/// the realm scope or the Auto-Refresh Set takes `&mut self` and affects only
/// later calls.
#[derive(Debug)]
pub struct KeycloakAdmin {
    pub(crate) executor: RequestExecutor,
    realm_name: String,
    user_realm_name: Option<String>,
}

impl KeycloakAdmin {
    /// Validates the configuration and acquires the initial token.
    ///
    /// Nothing is requested when a token was pre-supplied or no credentials
    /// are configured.
    pub async fn connect(config: AdminConfig) -> Result<Self> {
        let presupplied = config.token.is_some();
        let admin = Self::new(config)?;
        if !presupplied {
            admin.executor.acquire_token().await?;
        }
        Ok(admin)
    }

    /// Builds the facade without any network activity.
    ///
    /// Calls made before a token is acquired or set go out unauthenticated.
    pub fn new(config: AdminConfig) -> Result<Self> {
        config.validate()?;
        let auto_refresh = AutoRefreshSet::parse(&config.auto_refresh_token)?;
        let credentials = config.credentials();
        let token_realm = config.token_realm().to_string();

        let connection = Connection::new(&config.connection)?;
        let client = OpenIdClient::new(
            &config.connection,
            token_realm.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        )?;
        let mut tokens = TokenManager::new(client, credentials);
        if let Some(token) = config.token {
            tokens = tokens.with_token(token);
        }

        debug!(
            realm = %config.realm_name,
            token_realm = %token_realm,
            auto_refresh = %auto_refresh,
            "admin client configured"
        );
        let executor = RequestExecutor::new(
            connection,
            tokens,
            auto_refresh,
            config.refresh_fallback,
            config.page_size,
            token_realm,
        )?;

        Ok(Self {
            executor,
            realm_name: config.realm_name,
            user_realm_name: config.user_realm_name,
        })
    }

    /// Realm being administered.
    #[must_use]
    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    /// Changes the administered realm.
    pub fn set_realm_name(&mut self, realm_name: impl Into<String>) {
        self.realm_name = realm_name.into();
        self.sync_token_realm();
    }

    /// Realm the principal authenticates against, if distinct.
    #[must_use]
    pub fn user_realm_name(&self) -> Option<&str> {
        self.user_realm_name.as_deref()
    }

    /// Changes the realm the principal authenticates against.
    pub fn set_user_realm_name(&mut self, user_realm_name: Option<String>) {
        self.user_realm_name = user_realm_name;
        self.sync_token_realm();
    }

    /// Realm tokens are requested from: the user realm if set, else the administered realm.
    #[must_use]
    pub fn token_realm(&self) -> &str {
        self.user_realm_name.as_deref().unwrap_or(&self.realm_name)
    }

    /// Verbs enabled for refresh-and-retry.
    #[must_use]
    pub const fn auto_refresh(&self) -> &AutoRefreshSet {
        self.executor.auto_refresh()
    }

    /// Replaces the Auto-Refresh Set. Unknown verbs leave the set unchanged.
    pub fn set_auto_refresh_token<I, S>(&mut self, verbs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = AutoRefreshSet::parse(verbs)?;
        self.executor.set_auto_refresh(set);
        Ok(())
    }

    /// The Request Executor.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// The admin connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        self.executor.connection()
    }

    /// The OIDC client tokens are requested through.
    #[must_use]
    pub const fn openid(&self) -> &OpenIdClient {
        self.executor.tokens().client()
    }

    /// Snapshot of the Token Record.
    #[must_use]
    pub fn token(&self) -> Option<TokenRecord> {
        self.executor.tokens().token()
    }

    /// Replaces the Token Record and the bearer sent with requests.
    pub fn set_token(&self, token: Option<TokenRecord>) -> Result<()> {
        self.executor.tokens().set_token(token);
        self.executor.sync_bearer()
    }

    /// Drops the refresh token so the next refresh re-acquires with credentials.
    pub fn strip_refresh_token(&self) {
        self.executor.tokens().strip_refresh_token();
    }

    /// Acquires a new token with the stored credentials.
    pub async fn get_token(&self) -> Result<()> {
        self.executor.acquire_token().await
    }

    /// Refreshes the token now, following the configured fallback policy.
    pub async fn refresh_token(&self) -> Result<()> {
        self.executor.refresh_token().await
    }

    /// Adds a header sent with every admin request.
    pub fn add_param_headers(&self, name: &str, value: &str) -> Result<()> {
        self.connection().add_param_headers(name, value)
    }

    /// Removes a header added with [`KeycloakAdmin::add_param_headers`].
    pub fn del_param_headers(&self, name: &str) -> bool {
        self.connection().del_param_headers(name)
    }

    /// Fills a template scoped to the administered realm.
    pub(crate) fn path(&self, template: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(("realm-name", self.realm_name.as_str()));
        all.extend_from_slice(params);
        urls::fill(template, &all)
    }

    fn sync_token_realm(&mut self) {
        let realm = self.token_realm().to_string();
        self.executor.set_token_realm(realm);
    }
}

/// Serializes a caller payload.
pub(crate) fn to_payload(payload: &impl Serialize) -> Result<Value> {
    serde_json::to_value(payload).map_err(Error::from)
}
