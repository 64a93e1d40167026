//! Bearer-token session handles for the two API surfaces.

use crate::retry::REQUEST_TIMEOUT;
use flowlog_error::{ApiError, ApiErrorKind, FlowlogResult};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

/// An owned HTTP session authenticated with a fixed bearer token.
///
/// The application session uses this directly; the console session wraps it
/// so re-authentication can swap the credential without touching the
/// application handle.
#[derive(Debug, Clone)]
pub struct BearerSession {
    client: Client,
    token: String,
}

impl BearerSession {
    /// Creates a session around a bearer token.
    pub fn new(token: impl Into<String>) -> FlowlogResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ApiError::new(ApiErrorKind::Transport(format!(
                    "failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Issues an authenticated GET, mapping transport failures to [`ApiError`].
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        self.client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::new(ApiErrorKind::Transport(format!("request failed: {}", e))))
    }
}

/// The console-scoped session: a swappable bearer credential plus the
/// login credentials able to re-mint it.
///
/// Created lazily: with only email+password present, no network call happens
/// until [`ConsoleSession::ensure`] is first invoked.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    base_url: String,
    email: Option<String>,
    password: Option<String>,
    session: Option<BearerSession>,
    login_client: Client,
}

impl ConsoleSession {
    /// Creates a console session holder for `base_url`.
    ///
    /// An explicit `token` installs a session immediately (no network call);
    /// otherwise `email`+`password` enable lazy login and refresh-on-401.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> FlowlogResult<Self> {
        let session = match token {
            Some(token) => Some(BearerSession::new(token)?),
            None => None,
        };
        let login_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ApiError::new(ApiErrorKind::Transport(format!(
                    "failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self {
            base_url: base_url.into(),
            email,
            password,
            session,
            login_client,
        })
    }

    /// Whether login credentials are available for (re-)minting a token.
    pub fn has_credentials(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }

    /// Whether any console access (token or credentials) was configured.
    pub fn is_configured(&self) -> bool {
        self.session.is_some() || self.has_credentials()
    }

    /// Ensures a usable session exists, logging in lazily when only
    /// credentials are present. Returns whether the session is usable.
    #[instrument(skip(self))]
    pub async fn ensure(&mut self) -> bool {
        if self.session.is_some() {
            // An installed token is assumed valid; a 401 on use triggers
            // the re-login path instead.
            return true;
        }
        if self.has_credentials() {
            return self.login().await;
        }
        false
    }

    /// Logs in against the console API and installs the access token.
    ///
    /// Returns `false` on any failure (transport, non-success result,
    /// malformed response) without raising.
    #[instrument(skip(self))]
    pub async fn login(&mut self) -> bool {
        let (Some(email), Some(password)) = (self.email.clone(), self.password.clone()) else {
            return false;
        };

        let url = format!("{}/console/api/login", self.base_url);
        let response = match self
            .login_client
            .post(&url)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "console login request failed");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "console login rejected");
            return false;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "console login returned malformed body");
                return false;
            }
        };

        if body.get("result").and_then(Value::as_str) != Some("success") {
            warn!(
                detail = %body.get("data").cloned().unwrap_or(serde_json::Value::Null),
                "console login did not succeed"
            );
            return false;
        }

        let token = body
            .get("data")
            .and_then(|data| data.get("access_token"))
            .and_then(Value::as_str);
        match token {
            Some(token) => match BearerSession::new(token) {
                Ok(session) => {
                    self.session = Some(session);
                    info!(user = %email, "console session established");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "failed to build console session");
                    false
                }
            },
            None => {
                warn!("console login succeeded but no access_token was returned");
                false
            }
        }
    }

    /// Handles an unauthorized console response: re-login once when
    /// credentials allow it. Returns whether a retry is warranted.
    #[instrument(skip(self))]
    pub async fn handle_auth_error(&mut self) -> bool {
        if self.has_credentials() {
            debug!("console token may have expired, re-authenticating");
            return self.login().await;
        }
        false
    }

    /// Issues an authenticated GET through the installed session.
    ///
    /// Callers must have checked [`ConsoleSession::ensure`] first; without a
    /// session this reports an unauthorized status.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        match &self.session {
            Some(session) => session.get(url, &[]).await,
            None => Err(ApiError::new(ApiErrorKind::Status {
                status: 401,
                body: "no console session available".into(),
            })),
        }
    }
}
