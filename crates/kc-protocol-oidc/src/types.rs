//! Grant types, credentials and the refresh fallback policy.

use std::fmt;
use std::str::FromStr;

use kc_core::Error;
use serde::{Deserialize, Serialize};

/// OAuth 2.0 grant types used against the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Resource owner password credentials grant (RFC 6749 Section 4.3).
    Password,

    /// Client credentials grant (RFC 6749 Section 4.4).
    ClientCredentials,

    /// Refresh token grant (RFC 6749 Section 6).
    RefreshToken,
}

impl GrantType {
    /// The `grant_type` form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(Self::Password),
            "client_credentials" => Ok(Self::ClientCredentials),
            "refresh_token" => Ok(Self::RefreshToken),
            _ => Err(format!("unknown grant type: {s}")),
        }
    }
}

/// One request to the token endpoint, with the parameters specific to its grant.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
    /// Password grant. Sends `scope=openid` and the one-time code when given.
    Password {
        /// Username.
        username: String,
        /// Password.
        password: String,
        /// Current TOTP code.
        totp: Option<String>,
    },

    /// Client credentials grant.
    ClientCredentials,

    /// Refresh token grant.
    RefreshToken(String),
}

impl Grant {
    /// Grant type of this request.
    #[must_use]
    pub const fn grant_type(&self) -> GrantType {
        match self {
            Self::Password { .. } => GrantType::Password,
            Self::ClientCredentials => GrantType::ClientCredentials,
            Self::RefreshToken(_) => GrantType::RefreshToken,
        }
    }
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { username, totp, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .field("totp", &totp.as_ref().map(|_| "[REDACTED]"))
                .finish(),
            Self::ClientCredentials => f.write_str("ClientCredentials"),
            Self::RefreshToken(_) => f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish(),
        }
    }
}

/// Credentials the Token Manager acquires tokens with.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Username and password, against a public or confidential client.
    Password {
        /// Username.
        username: String,
        /// Password.
        password: String,
        /// Current TOTP code.
        totp: Option<String>,
    },

    /// The client's own secret, through the client credentials grant.
    ClientCredentials,

    /// No credentials. Tokens come from the caller, if at all.
    #[default]
    None,
}

impl Credentials {
    /// Chooses the credential mode from the configured values.
    ///
    /// A username with a password wins; otherwise a client secret selects the
    /// client credentials grant; otherwise there are no credentials.
    #[must_use]
    pub fn select(
        username: Option<&str>,
        password: Option<&str>,
        totp: Option<&str>,
        client_secret: Option<&str>,
    ) -> Self {
        match (username, password) {
            (Some(username), Some(password)) => Self::Password {
                username: username.to_string(),
                password: password.to_string(),
                totp: totp.map(str::to_string),
            },
            _ if client_secret.is_some_and(|secret| !secret.is_empty()) => {
                Self::ClientCredentials
            }
            _ => Self::None,
        }
    }

    /// The grant that acquires a fresh token with these credentials.
    #[must_use]
    pub fn grant(&self) -> Option<Grant> {
        match self {
            Self::Password {
                username,
                password,
                totp,
            } => Some(Grant::Password {
                username: username.clone(),
                password: password.clone(),
                totp: totp.clone(),
            }),
            Self::ClientCredentials => Some(Grant::ClientCredentials),
            Self::None => None,
        }
    }

    /// Returns whether a token can be acquired with these credentials.
    #[must_use]
    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish_non_exhaustive(),
            Self::ClientCredentials => f.write_str("ClientCredentials"),
            Self::None => f.write_str("None"),
        }
    }
}

/// What to do when a refresh grant fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshFallback {
    /// Surface the failure.
    #[default]
    Never,

    /// Re-acquire with the stored credentials when the server reports the
    /// refresh token as expired or inactive.
    OnInactiveRefreshToken,

    /// Re-acquire with the stored credentials after any failed refresh grant.
    Always,
}

/// Messages Keycloak answers a refresh grant with once the refresh token is no longer usable.
const INACTIVE_REFRESH_TOKEN_MESSAGES: [&str; 2] = ["Refresh token expired", "Token is not active"];

impl RefreshFallback {
    /// Returns whether the policy re-acquires after this refresh failure.
    ///
    /// Transport failures never qualify.
    #[must_use]
    pub fn applies_to(self, error: &Error) -> bool {
        match self {
            Self::Never => false,
            Self::Always => error.is_authentication(),
            Self::OnInactiveRefreshToken => match error {
                Error::Authentication { status: 400, body } => {
                    let body = String::from_utf8_lossy(body);
                    INACTIVE_REFRESH_TOKEN_MESSAGES
                        .iter()
                        .any(|message| body.contains(message))
                }
                _ => false,
            },
        }
    }
}

impl FromStr for RefreshFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "on_inactive_refresh_token" => Ok(Self::OnInactiveRefreshToken),
            "always" => Ok(Self::Always),
            _ => Err(format!("unknown refresh fallback policy: {s}")),
        }
    }
}
