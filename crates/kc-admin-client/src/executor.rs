//! Request Executor.
//!
//! Every admin operation goes through [`RequestExecutor::send`]:
//!
//! 1. call the connection with the current bearer
//! 2. on 401, refresh and retry once if the verb is in the Auto-Refresh Set,
//!    otherwise fail with an authentication error
//! 3. classify: 2xx becomes an [`ApiResponse`], anything else the error of the
//!    initiating verb
//!
//! Listing, creation and lookup helpers are layered on top.

use kc_core::{ApiResponse, Connection, Error, HttpVerb, Query, ResponseEnvelope, Result};
use kc_protocol_oidc::{RefreshFallback, TokenManager};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::outcome::CreateResult;
use crate::refresh::AutoRefreshSet;

const UNAUTHORIZED: u16 = 401;
const CONFLICT: u16 = 409;

/// Authenticated request execution against the admin API.
#[derive(Debug)]
pub struct RequestExecutor {
    connection: Connection,
    tokens: TokenManager,
    auto_refresh: AutoRefreshSet,
    fallback: RefreshFallback,
    page_size: usize,
    token_realm: String,
}

impl RequestExecutor {
    /// Wires a connection to a token manager. The connection's bearer is set
    /// from whatever token the manager already holds.
    pub fn new(
        connection: Connection,
        tokens: TokenManager,
        auto_refresh: AutoRefreshSet,
        fallback: RefreshFallback,
        page_size: usize,
        token_realm: impl Into<String>,
    ) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::configuration("page_size must be greater than zero"));
        }
        let executor = Self {
            connection,
            tokens,
            auto_refresh,
            fallback,
            page_size,
            token_realm: token_realm.into(),
        };
        executor.sync_bearer()?;
        Ok(executor)
    }

    /// The admin connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The token manager.
    #[must_use]
    pub const fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Verbs enabled for refresh-and-retry.
    #[must_use]
    pub const fn auto_refresh(&self) -> &AutoRefreshSet {
        &self.auto_refresh
    }

    /// Replaces the Auto-Refresh Set.
    pub fn set_auto_refresh(&mut self, auto_refresh: AutoRefreshSet) {
        self.auto_refresh = auto_refresh;
    }

    /// Page size used by [`RequestExecutor::fetch_all`].
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Realm tokens are requested from.
    #[must_use]
    pub fn token_realm(&self) -> &str {
        &self.token_realm
    }

    /// Changes the realm future tokens are requested from.
    pub fn set_token_realm(&mut self, realm: impl Into<String>) {
        self.token_realm = realm.into();
    }

    /// Copies the live access token into the connection's bearer.
    pub fn sync_bearer(&self) -> Result<()> {
        self.connection
            .set_bearer(self.tokens.access_token().as_deref())
    }

    /// Acquires a token with the stored credentials.
    pub async fn acquire_token(&self) -> Result<()> {
        self.tokens.acquire(&self.token_realm).await?;
        self.sync_bearer()
    }

    /// Refreshes the token, falling back to a full acquire when the policy allows it.
    pub async fn refresh_token(&self) -> Result<()> {
        match self.tokens.refresh(&self.token_realm).await {
            Ok(_) => {}
            Err(err) if self.fallback.applies_to(&err) && self.tokens.has_credentials() => {
                warn!(
                    realm = %self.token_realm,
                    status = ?err.status(),
                    "refresh grant rejected, acquiring a new token"
                );
                self.tokens.acquire(&self.token_realm).await?;
            }
            Err(err) => return Err(err),
        }
        self.sync_bearer()
    }

    /// Performs one logical call: refresh-and-retry, then classification.
    pub async fn send(
        &self,
        verb: HttpVerb,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ApiResponse> {
        self.dispatch(verb, path, query, payload)
            .await?
            .into_result(verb)
    }

    async fn dispatch(
        &self,
        verb: HttpVerb,
        path: &str,
        query: &Query,
        payload: Option<&Value>,
    ) -> Result<ResponseEnvelope> {
        let envelope = self.connection.request(verb, path, query, payload).await?;
        if envelope.status_code() != UNAUTHORIZED {
            return Ok(envelope);
        }

        if !self.auto_refresh.contains(verb) {
            debug!(method = %verb, path, "401 on a verb without auto-refresh");
            return Err(Error::authentication(UNAUTHORIZED, envelope.body));
        }

        debug!(method = %verb, path, "401 received, refreshing token and retrying once");
        self.refresh_token().await?;

        let retry = self.connection.request(verb, path, query, payload).await?;
        if retry.status_code() == UNAUTHORIZED {
            return Err(Error::authentication(UNAUTHORIZED, retry.body));
        }
        Ok(retry)
    }

    /// GET a JSON document.
    pub async fn get_json(&self, path: &str, query: &Query) -> Result<Value> {
        self.send(HttpVerb::Get, path, query, None)
            .await?
            .into_json()
    }

    /// GET a single page of records.
    pub async fn get_list(&self, path: &str, query: &Query) -> Result<Vec<Value>> {
        self.send(HttpVerb::Get, path, query, None)
            .await?
            .into_list()
    }

    /// GET every record of a paginated listing.
    ///
    /// Pages of [`RequestExecutor::page_size`] records are requested from
    /// offset 0 until a page comes back short. A query that already carries
    /// `first` or `max` is sent once, as is.
    pub async fn fetch_all(&self, path: &str, query: &Query) -> Result<Vec<Value>> {
        if query.is_page_bounded() {
            return self.get_list(path, query).await;
        }

        let mut query = query.clone();
        let mut records = Vec::new();
        let mut first = 0;
        loop {
            query.set("first", first);
            query.set("max", self.page_size);
            let page = self.get_list(path, &query).await?;
            let fetched = page.len();
            records.extend(page);
            trace!(path, first, fetched, total = records.len(), "page fetched");
            if fetched < self.page_size {
                break;
            }
            first += self.page_size;
        }
        debug!(path, total = records.len(), "listing assembled");
        Ok(records)
    }

    /// GET a count endpoint.
    pub async fn count(&self, path: &str, query: &Query) -> Result<u64> {
        let value = self.get_json(path, query).await?;
        value
            .as_u64()
            .or_else(|| value.get("count").and_then(Value::as_u64))
            .ok_or_else(|| Error::UnexpectedResponse(format!("expected a count, got {value}")))
    }

    /// POST a creation payload.
    ///
    /// With `skip_exists`, a 409 yields [`CreateResult::AlreadyExists`] instead
    /// of an error. No lookup is made either way.
    pub async fn create(
        &self,
        path: &str,
        query: &Query,
        payload: &Value,
        skip_exists: bool,
    ) -> Result<CreateResult> {
        let envelope = self
            .dispatch(HttpVerb::Post, path, query, Some(payload))
            .await?;

        if skip_exists && envelope.status_code() == CONFLICT {
            debug!(path, "entity already exists");
            return Ok(CreateResult::AlreadyExists);
        }

        let id = envelope.location_id();
        let response = envelope.into_result(HttpVerb::Post)?;
        Ok(CreateResult::Created { id, response })
    }

    /// POST with an optional payload.
    pub async fn post(&self, path: &str, query: &Query, payload: Option<&Value>) -> Result<ApiResponse> {
        self.send(HttpVerb::Post, path, query, payload).await
    }

    /// PUT with an optional payload.
    pub async fn put(&self, path: &str, query: &Query, payload: Option<&Value>) -> Result<ApiResponse> {
        self.send(HttpVerb::Put, path, query, payload).await
    }

    /// DELETE, with a payload for endpoints that take one.
    pub async fn delete(&self, path: &str, payload: Option<&Value>) -> Result<ApiResponse> {
        self.send(HttpVerb::Delete, path, &Query::new(), payload)
            .await
    }
}
