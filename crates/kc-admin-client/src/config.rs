//! Admin client configuration.
//!
//! Read from `~/.keycloak/kc-admin.toml`, from `KC_*` environment variables,
//! or built in code:
//!
//! ```toml
//! server_url = "https://sso.example.com/"
//! realm_name = "acme"
//! user_realm_name = "master"
//! username = "admin"
//! password = "admin"
//! auto_refresh_token = ["get", "put"]
//! refresh_fallback = "on_inactive_refresh_token"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use kc_core::{ConnectionConfig, Error, Result};
use kc_protocol_oidc::{Credentials, RefreshFallback, TokenRecord};
use serde::{Deserialize, Serialize};

/// Default page size for auto-paginated listings.
pub const DEFAULT_PAGE_SIZE: usize = 100;

fn default_realm_name() -> String {
    "master".to_string()
}

fn default_client_id() -> String {
    "admin-cli".to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Everything needed to build a [`crate::KeycloakAdmin`].
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Server URL, TLS verification, timeout and custom headers.
    #[serde(flatten)]
    pub connection: ConnectionConfig,

    /// Realm being administered.
    #[serde(default = "default_realm_name")]
    pub realm_name: String,

    /// Realm the administrative principal authenticates against, when it
    /// differs from `realm_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_realm_name: Option<String>,

    /// Client the principal authenticates through.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Secret of a confidential client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Username for the password grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for the password grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// One-time code sent with the password grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp: Option<String>,

    /// Verbs for which a 401 triggers refresh-and-retry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auto_refresh_token: Vec<String>,

    /// What to do when the refresh grant fails.
    #[serde(default)]
    pub refresh_fallback: RefreshFallback,

    /// Page size for auto-paginated listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pre-supplied token. Skips the initial acquire.
    #[serde(skip)]
    pub token: Option<TokenRecord>,
}

impl AdminConfig {
    /// Creates a configuration for the given server with default settings.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig::new(server_url),
            realm_name: default_realm_name(),
            user_realm_name: None,
            client_id: default_client_id(),
            client_secret: None,
            username: None,
            password: None,
            totp: None,
            auto_refresh_token: Vec::new(),
            refresh_fallback: RefreshFallback::default(),
            page_size: DEFAULT_PAGE_SIZE,
            token: None,
        }
    }

    /// Path of the per-user configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| Error::configuration("could not determine home directory"))?;
        Ok(home.join(".keycloak").join("kc-admin.toml"))
    }

    /// Loads `~/.keycloak/kc-admin.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Loads a TOML configuration file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| Error::configuration(format!("{}: {e}", path.display())))
    }

    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("failed to parse config: {e}")))
    }

    /// Reads `KC_*` environment variables. `KC_SERVER_URL` is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a variable lookup, as [`AdminConfig::from_env`] does.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server_url = lookup("KC_SERVER_URL")
            .ok_or_else(|| Error::configuration("KC_SERVER_URL is not set"))?;
        let mut config = Self::new(server_url);

        if let Some(realm) = lookup("KC_REALM") {
            config.realm_name = realm;
        }
        if let Some(client_id) = lookup("KC_CLIENT_ID") {
            config.client_id = client_id;
        }
        config.user_realm_name = lookup("KC_USER_REALM");
        config.client_secret = lookup("KC_CLIENT_SECRET");
        config.username = lookup("KC_USERNAME");
        config.password = lookup("KC_PASSWORD");
        config.totp = lookup("KC_TOTP");

        if let Some(verbs) = lookup("KC_AUTO_REFRESH") {
            config.auto_refresh_token = verbs
                .split(',')
                .map(str::trim)
                .filter(|verb| !verb.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(verify) = lookup("KC_VERIFY") {
            config.connection.verify = parse_bool("KC_VERIFY", &verify)?;
        }
        if let Some(timeout) = lookup("KC_TIMEOUT_SECS") {
            config.connection.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::configuration(format!("KC_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
        }
        Ok(config)
    }

    /// Sets the administered realm.
    #[must_use]
    pub fn with_realm(mut self, realm_name: impl Into<String>) -> Self {
        self.realm_name = realm_name.into();
        self
    }

    /// Sets the realm the principal authenticates against.
    #[must_use]
    pub fn with_user_realm(mut self, user_realm_name: impl Into<String>) -> Self {
        self.user_realm_name = Some(user_realm_name.into());
        self
    }

    /// Sets the client id.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the client secret.
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets username and password for the password grant.
    #[must_use]
    pub fn with_password(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the one-time code sent with the password grant.
    #[must_use]
    pub fn with_totp(mut self, totp: impl Into<String>) -> Self {
        self.totp = Some(totp.into());
        self
    }

    /// Sets the verbs for which a 401 triggers refresh-and-retry.
    #[must_use]
    pub fn with_auto_refresh<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auto_refresh_token = verbs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the refresh fallback policy.
    #[must_use]
    pub const fn with_refresh_fallback(mut self, fallback: RefreshFallback) -> Self {
        self.refresh_fallback = fallback;
        self
    }

    /// Sets the auto-pagination page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Starts from an existing token instead of acquiring one.
    #[must_use]
    pub fn with_token(mut self, token: TokenRecord) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets TLS verification.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.connection = self.connection.with_verify(verify);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.connection = self.connection.with_timeout_secs(secs);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.connection = self.connection.with_header(name, value);
        self
    }

    /// Realm tokens are requested from.
    #[must_use]
    pub fn token_realm(&self) -> &str {
        self.user_realm_name.as_deref().unwrap_or(&self.realm_name)
    }

    /// Credential mode implied by the configured values.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::select(
            self.username.as_deref(),
            self.password.as_deref(),
            self.totp.as_deref(),
            self.client_secret.as_deref(),
        )
    }

    /// Checks everything that can be checked without the network.
    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;
        if self.realm_name.is_empty() {
            return Err(Error::configuration("realm_name must not be empty"));
        }
        if self.page_size == 0 {
            return Err(Error::configuration("page_size must be greater than zero"));
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration(format!("{name} is not a boolean: {value}"))),
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AdminConfig")
            .field("connection", &self.connection)
            .field("realm_name", &self.realm_name)
            .field("user_realm_name", &self.user_realm_name)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("totp", &redacted(&self.totp))
            .field("auto_refresh_token", &self.auto_refresh_token)
            .field("refresh_fallback", &self.refresh_fallback)
            .field("page_size", &self.page_size)
            .field("token", &self.token)
            .finish()
    }
}
