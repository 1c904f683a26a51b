//! HTTP connection to a Keycloak server.
//!
//! A [`Connection`] performs exactly one HTTP call per method invocation and
//! hands back a [`ResponseEnvelope`] whatever the status code. It never retries.
//!
//! Headers are assembled per request in this order, later entries winning:
//!
//! 1. `Content-Type: application/json`
//! 2. the configured custom headers and any added with
//!    [`Connection::add_param_headers`]
//! 3. `Authorization: Bearer <token>` from the live token, when one is set
//!
//! A custom `Authorization` header is never kept; the bearer always comes from
//! [`Connection::set_bearer`].

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::response::ResponseEnvelope;
use crate::verb::HttpVerb;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An HTTP transport bound to one Keycloak server.
#[derive(Debug)]
pub struct Connection {
    client: reqwest::Client,
    base_url: Url,
    headers: RwLock<HeaderMap>,
    bearer: RwLock<Option<HeaderValue>>,
}

impl Connection {
    /// Builds the HTTP client for the given configuration.
    ///
    /// Fails with a configuration error on an unparseable server URL or an
    /// invalid custom header, before any network activity.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let base_url = normalize_base_url(&config.server_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (name, value) in &config.custom_headers {
            let (name, value) = header_pair(name, value)?;
            if name == AUTHORIZATION {
                debug!("ignoring custom Authorization header; the bearer comes from the token");
                continue;
            }
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify)
            .build()?;

        Ok(Self {
            client,
            base_url,
            headers: RwLock::new(headers),
            bearer: RwLock::new(None),
        })
    }

    /// Base URL every path is resolved against. Always ends with `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a server-relative path.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Replaces the bearer token sent with every request; `None` stops sending one.
    pub fn set_bearer(&self, access_token: Option<&str>) -> Result<()> {
        let value = match access_token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| Error::configuration("access token is not a valid header value"))?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };
        *self.bearer.write() = value;
        Ok(())
    }

    /// Returns whether a bearer token is currently set.
    #[must_use]
    pub fn has_bearer(&self) -> bool {
        self.bearer.read().is_some()
    }

    /// Adds or replaces a default header.
    ///
    /// `Authorization` is rejected: it is owned by the token.
    pub fn add_param_headers(&self, name: &str, value: &str) -> Result<()> {
        let (name, value) = header_pair(name, value)?;
        if name == AUTHORIZATION {
            return Err(Error::configuration(
                "the Authorization header is managed by the token and cannot be overridden",
            ));
        }
        self.headers.write().insert(name, value);
        Ok(())
    }

    /// Removes a default header. Returns whether it was present.
    pub fn del_param_headers(&self, name: &str) -> bool {
        self.headers.write().remove(name).is_some()
    }

    /// Snapshot of the default headers, without the bearer.
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        self.headers.read().clone()
    }

    /// Performs one call and returns its envelope, whatever the status.
    pub async fn request(
        &self,
        verb: HttpVerb,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResponseEnvelope> {
        let url = self.url(path)?;
        trace!(method = %verb, url = %url, "sending request");

        let mut builder = self
            .client
            .request(verb.method(), url)
            .headers(self.request_headers());
        if !query.is_empty() {
            builder = builder.query(query.pairs());
        }
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }

        self.send(verb, builder).await
    }

    /// GET `path`.
    pub async fn get(&self, path: &str, query: &Query) -> Result<ResponseEnvelope> {
        self.request(HttpVerb::Get, path, query, None).await
    }

    /// POST `path` with an optional JSON payload.
    pub async fn post(
        &self,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResponseEnvelope> {
        self.request(HttpVerb::Post, path, query, payload).await
    }

    /// PUT `path` with an optional JSON payload.
    pub async fn put(
        &self,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResponseEnvelope> {
        self.request(HttpVerb::Put, path, query, payload).await
    }

    /// DELETE `path`. Some endpoints, such as role-mapping removal, take a body.
    pub async fn delete(
        &self,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResponseEnvelope> {
        self.request(HttpVerb::Delete, path, query, payload).await
    }

    /// GET `path` authenticated with `access_token` instead of the connection's bearer.
    pub async fn get_as(&self, path: &str, access_token: &str) -> Result<ResponseEnvelope> {
        let url = self.url(path)?;
        trace!(url = %url, "sending request with caller token");

        let builder = self
            .client
            .get(url)
            .headers(self.headers.read().clone())
            .bearer_auth(access_token);
        self.send(HttpVerb::Get, builder).await
    }

    /// POST `path` with a form-encoded body, as the OIDC endpoints expect.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<ResponseEnvelope> {
        let url = self.url(path)?;
        trace!(url = %url, "sending form");

        let mut headers = self.request_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let builder = self.client.post(url).headers(headers).form(form);
        self.send(HttpVerb::Post, builder).await
    }

    fn request_headers(&self) -> HeaderMap {
        let mut headers = self.headers.read().clone();
        if let Some(bearer) = self.bearer.read().as_ref() {
            headers.insert(AUTHORIZATION, bearer.clone());
        }
        headers
    }

    async fn send(
        &self,
        verb: HttpVerb,
        builder: reqwest::RequestBuilder,
    ) -> Result<ResponseEnvelope> {
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(method = %verb, status = status.as_u16(), bytes = body.len(), "response received");
        Ok(ResponseEnvelope::new(status, headers, body))
    }
}

fn normalize_base_url(server_url: &str) -> Result<Url> {
    let mut url = Url::parse(server_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::configuration(format!(
            "server_url is not a base URL: {server_url}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::configuration(format!("invalid header name: {name}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|_| Error::configuration(format!("invalid value for header {name}")))?;
    Ok((header_name, header_value))
}
