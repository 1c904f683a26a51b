//! Client side of a realm's `OpenID` Connect endpoints.

use kc_core::{ApiResponse, Connection, ConnectionConfig, Error, HttpVerb, Query, Result};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ErrorResponse;
use crate::token::{IntrospectionResponse, TokenRecord};
use crate::types::Grant;

fn realm_path(realm: &str, rest: &str) -> String {
    format!("realms/{}/{rest}", urlencoding::encode(realm))
}

fn endpoint(realm: &str, name: &str) -> String {
    realm_path(realm, &format!("protocol/openid-connect/{name}"))
}

/// A client registered in one realm, talking to that realm's OIDC endpoints.
///
/// Token endpoint failures are authentication errors. Every other endpoint
/// fails with the error of its HTTP verb.
#[derive(Debug)]
pub struct OpenIdClient {
    connection: Connection,
    realm_name: String,
    client_id: String,
    client_secret: Option<String>,
}

impl OpenIdClient {
    /// Creates a client with its own connection.
    pub fn new(
        config: &ConnectionConfig,
        realm_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: Option<String>,
    ) -> Result<Self> {
        Ok(Self::with_connection(
            Connection::new(config)?,
            realm_name,
            client_id,
            client_secret,
        ))
    }

    /// Creates a client over an existing connection.
    #[must_use]
    pub fn with_connection(
        connection: Connection,
        realm_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            connection,
            realm_name: realm_name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.filter(|secret| !secret.is_empty()),
        }
    }

    /// Realm this client is registered in.
    #[must_use]
    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    /// Client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns whether the client authenticates with a secret.
    #[must_use]
    pub const fn is_confidential(&self) -> bool {
        self.client_secret.is_some()
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The realm's discovery document.
    pub async fn well_known(&self) -> Result<Value> {
        self.get_json(&realm_path(&self.realm_name, ".well-known/openid-configuration"))
            .await
    }

    /// Authorization endpoint URL for the code flow. Makes no request.
    pub fn auth_url(&self, redirect_uri: &str, scope: &str, state: &str) -> Result<Url> {
        let mut url = self.connection.url(&endpoint(&self.realm_name, "auth"))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", scope)
            .append_pair("state", state);
        Ok(url)
    }

    /// Password grant against this client's realm.
    pub async fn token(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<TokenRecord> {
        let grant = Grant::Password {
            username: username.to_string(),
            password: password.to_string(),
            totp: totp.map(str::to_string),
        };
        self.request_token(&self.realm_name, &grant).await
    }

    /// Client credentials grant against this client's realm.
    pub async fn client_credentials(&self) -> Result<TokenRecord> {
        self.request_token(&self.realm_name, &Grant::ClientCredentials)
            .await
    }

    /// Refresh token grant against this client's realm.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord> {
        self.request_token(&self.realm_name, &Grant::RefreshToken(refresh_token.to_string()))
            .await
    }

    /// Runs a grant against the token endpoint of `realm`.
    ///
    /// The client secret is sent whenever one is configured.
    pub async fn request_token(&self, realm: &str, grant: &Grant) -> Result<TokenRecord> {
        let grant_type = grant.grant_type();
        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", grant_type.as_str()),
            ("client_id", self.client_id.as_str()),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        match grant {
            Grant::Password {
                username,
                password,
                totp,
            } => {
                form.push(("username", username.as_str()));
                form.push(("password", password.as_str()));
                form.push(("scope", "openid"));
                if let Some(totp) = totp {
                    form.push(("totp", totp.as_str()));
                }
            }
            Grant::ClientCredentials => {}
            Grant::RefreshToken(refresh_token) => form.push(("refresh_token", refresh_token.as_str())),
        }

        debug!(realm = %realm, grant = %grant_type, client_id = %self.client_id, "requesting token");
        let envelope = self
            .connection
            .post_form(&endpoint(realm, "token"), &form)
            .await?;

        if !envelope.is_success() {
            let status = envelope.status_code();
            if let Some(error) = ErrorResponse::parse(&envelope.body) {
                debug!(realm = %realm, status, error = %error.error, description = %error.message(), "token request rejected");
            }
            return Err(Error::authentication(status, envelope.body));
        }

        ApiResponse::from_envelope(envelope).json()
    }

    /// Claims about the user `access_token` was issued to.
    pub async fn userinfo(&self, access_token: &str) -> Result<Value> {
        let envelope = self
            .connection
            .get_as(&endpoint(&self.realm_name, "userinfo"), access_token)
            .await?;
        envelope.into_result(HttpVerb::Get)?.into_json()
    }

    /// Ends the session the refresh token belongs to.
    pub async fn logout(&self, refresh_token: &str) -> Result<ApiResponse> {
        let mut form = vec![("client_id", self.client_id.as_str()), ("refresh_token", refresh_token)];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        self.connection
            .post_form(&endpoint(&self.realm_name, "logout"), &form)
            .await?
            .into_result(HttpVerb::Post)
    }

    /// Token introspection. Requires a confidential client.
    pub async fn introspect(
        &self,
        token: &str,
        token_type_hint: Option<&str>,
    ) -> Result<IntrospectionResponse> {
        let Some(secret) = &self.client_secret else {
            return Err(Error::configuration(
                "token introspection requires a client secret",
            ));
        };
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", secret.as_str()),
            ("token", token),
        ];
        if let Some(hint) = token_type_hint {
            form.push(("token_type_hint", hint));
        }
        self.connection
            .post_form(&endpoint(&self.realm_name, "token/introspect"), &form)
            .await?
            .into_result(HttpVerb::Post)?
            .json()
    }

    /// The realm's JSON Web Key Set.
    pub async fn certs(&self) -> Result<Value> {
        self.get_json(&endpoint(&self.realm_name, "certs")).await
    }

    /// The realm's public key, as published on the realm endpoint.
    pub async fn public_key(&self) -> Result<String> {
        let realm = self
            .get_json(&format!("realms/{}", urlencoding::encode(&self.realm_name)))
            .await?;
        realm
            .get("public_key")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::UnexpectedResponse("realm has no public_key".to_string()))
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.connection
            .get(path, &Query::new())
            .await?
            .into_result(HttpVerb::Get)?
            .into_json()
    }
}
