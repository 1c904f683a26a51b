//! Test fixtures shared by the integration suite.

use kc_admin_client::{AdminConfig, KeycloakAdmin};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token endpoint of the master realm.
pub const TOKEN_PATH: &str = "/realms/master/protocol/openid-connect/token";

/// A mock Keycloak for one test.
pub struct TestEnv {
    /// The mock server. Tests mount admin resources on it directly.
    pub server: MockServer,
}

impl TestEnv {
    /// Starts a fresh mock server.
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kc_admin_client=debug,kc_protocol_oidc=debug")
            .with_test_writer()
            .try_init();

        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Configuration for `admin`/`admin` in the master realm, administering `realm`.
    pub fn config(&self, realm: &str) -> AdminConfig {
        AdminConfig::new(self.uri())
            .with_realm(realm)
            .with_user_realm("master")
            .with_password("admin", "admin")
    }

    /// Answers password grants on the master token endpoint with `access_token`.
    pub async fn mount_password_grant(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, "r-initial")))
            .mount(&self.server)
            .await;
    }

    /// Answers refresh grants on the master token endpoint with `access_token`.
    pub async fn mount_refresh_grant(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, "r-refreshed")))
            .mount(&self.server)
            .await;
    }

    /// Connects an admin client, acquiring the initial token.
    pub async fn admin(&self, config: AdminConfig) -> anyhow::Result<KeycloakAdmin> {
        Ok(KeycloakAdmin::connect(config).await?)
    }

    /// Number of received requests with `verb` on `request_path`.
    pub async fn count_requests(&self, verb: &str, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == verb && request.url.path() == request_path)
            .count()
    }
}

/// A token endpoint response.
pub fn token_body(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 60,
        "refresh_token": refresh_token,
        "refresh_expires_in": 1800,
        "scope": "openid profile email"
    })
}
