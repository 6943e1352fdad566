//! Authenticated HTTP pipeline with transparent token refresh.
//!
//! Requests attach the stored access token as a bearer header. A 401
//! triggers at most one refresh and one replay per original request;
//! concurrent 401s coalesce into a single refresh call through a
//! single-slot gate. Refresh failure is terminal: stored auth state is
//! cleared and the caller is told to re-authenticate.

use std::sync::Arc;

use anyhow::Context;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::store::SessionStore;

/// Dedicated refresh endpoint, called outside the authenticated pipeline.
const REFRESH_PATH: &str = "/auth/refresh";

/// Shared HTTP client handle; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    /// Single-slot gate: concurrent 401s wait here instead of issuing
    /// their own refresh calls.
    refresh_gate: Mutex<()>,
}

/// Refresh request body.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Rotated tokens returned by the refresh endpoint. The refresh token is
/// only replaced when the server rotates it.
#[derive(Debug, Deserialize)]
struct TokenPair {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration and a session store.
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                store,
                refresh_gate: Mutex::new(()),
            }),
        })
    }

    /// The session store backing this client.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` through the authenticated pipeline.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// POST `body` to `path` through the authenticated pipeline.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT `body` to `path` through the authenticated pipeline.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE `path` through the authenticated pipeline.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    /// POST without the refresh stage. Used for calls made before any
    /// session exists (login), where a 401 means bad credentials rather
    /// than an expired access token.
    pub(crate) async fn post_raw<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.execute(Method::POST, path, Some(body), None).await?;
        decode(resp).await
    }

    /// Issue a request with the refresh-on-401 pipeline.
    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let access = self.inner.store.session().map(|s| s.access_token);
        let resp = self
            .execute(method.clone(), path, body, access.as_deref())
            .await?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return decode(resp).await;
        }

        debug!(path, "request unauthorized; attempting token refresh");
        let renewed = self.refresh_access_token(access.as_deref()).await?;
        let resp = self.execute(method, path, body, Some(&renewed)).await?;

        // One refresh, one replay: a second 401 surfaces like any other error.
        decode(resp).await
    }

    /// Build and send a single request, attaching the bearer token when
    /// present. A missing token sends the request unauthenticated.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access_token: Option<&str>,
    ) -> ClientResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.inner.http.request(method, self.url(path));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Obtain a fresh access token, coalescing concurrent refreshes.
    ///
    /// `stale` is the token the failed request was sent with; if the store
    /// already holds a different token once the gate is acquired, another
    /// task refreshed first and that token is reused without a second call.
    async fn refresh_access_token(&self, stale: Option<&str>) -> ClientResult<String> {
        let _gate = self.inner.refresh_gate.lock().await;

        let session = self.inner.store.session();
        if let Some(session) = &session
            && stale != Some(session.access_token.as_str())
        {
            debug!("access token already rotated by a concurrent refresh");
            return Ok(session.access_token.clone());
        }

        let Some(session) = session else {
            // 401 with nothing to refresh: terminal.
            self.clear_auth_state();
            return Err(ClientError::SessionExpired);
        };

        match self.call_refresh(&session.refresh_token).await {
            Ok(tokens) => {
                self.inner
                    .store
                    .update_tokens(&tokens.access_token, tokens.refresh_token.as_deref())
                    .map_err(ClientError::Internal)?;
                debug!("access token refreshed");
                Ok(tokens.access_token)
            }
            Err(e) => {
                warn!(error = %e.message(), "token refresh failed; clearing session");
                self.clear_auth_state();
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// POST the refresh token to the dedicated refresh endpoint.
    async fn call_refresh(&self, refresh_token: &str) -> ClientResult<TokenPair> {
        let resp = self
            .inner
            .http
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        decode(resp).await
    }

    fn clear_auth_state(&self) {
        if let Err(e) = self.inner.store.clear_session() {
            warn!(error = %e, "failed to clear stored auth state");
        }
    }
}

/// Decode a response: success envelopes unwrap their `data` field, error
/// statuses normalize into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    if resp.status().is_success() {
        decode_success(resp).await
    } else {
        Err(normalize_error(resp).await)
    }
}

async fn decode_success<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    let text = resp.text().await?;
    let body: serde_json::Value = if text.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).context("response body is not valid JSON")?
    };

    // Success envelopes wrap the payload in `data`; bare payloads are
    // decoded directly.
    let payload = match body {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };

    Ok(serde_json::from_value(payload).context("failed to decode response payload")?)
}

/// Build a normalized error from a non-success response, preferring the
/// server-supplied message over a generic one.
async fn normalize_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let body: Option<serde_json::Value> = serde_json::from_str(&text).ok();

    let mut message = String::new();
    let mut errors = Vec::new();
    if let Some(serde_json::Value::Object(map)) = &body {
        if let Some(serde_json::Value::String(m)) = map.get("message") {
            message = m.clone();
        }
        if let Some(serde_json::Value::Array(list)) = map.get("errors") {
            errors = list
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
    }
    if message.is_empty() {
        message = format!("request failed with status {status}");
    }

    ClientError::Api {
        status: Some(status),
        message,
        errors,
        body,
    }
}
