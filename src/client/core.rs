use crate::error::Error;
use crate::session::{PrivateToken, Session, SessionStore};
use crate::transport::HttpTransport;
use crate::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Resolved client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Router origin, e.g. `http://mafreebox.freebox.fr`.
    pub endpoint: Url,
    /// Version path segment, e.g. `v8`.
    pub version: String,
    pub app_id: Option<String>,
    pub private_token: Option<PrivateToken>,
    pub timeout: Option<Duration>,
    /// Validity window recorded on each new session.
    pub session_ttl: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("version", &self.version)
            .field("app_id", &self.app_id)
            .field("private_token", &self.private_token)
            .field("timeout", &self.timeout)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

pub(crate) struct ClientInner {
    pub config: ClientConfig,
    /// `{endpoint}/api/{version}/`
    pub base_url: Url,
    pub transport: Arc<dyn HttpTransport>,
    pub session: SessionStore,
}

/// Async client for one router.
///
/// Cloning is cheap and clones share one session. Separately built clients
/// own independent sessions.
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.session.current().is_some())
            .finish()
    }
}

impl Client {
    /// Create a builder for the router at `endpoint` speaking API `version`.
    pub fn builder(endpoint: impl Into<String>, version: impl Into<String>) -> super::ClientBuilder {
        super::ClientBuilder::new(endpoint, version)
    }

    /// Client with default settings and no credentials.
    ///
    /// Only unauthenticated calls (version discovery, authorization) work until
    /// credentials are supplied through the builder.
    pub fn new(endpoint: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        Self::builder(endpoint, version).build()
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        base_url: Url,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                base_url,
                transport,
                session: SessionStore::default(),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Base URL of the versioned API (`{endpoint}/api/{version}/`).
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The cached session, if a handshake has completed.
    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.session.current()
    }

    /// Rebuild this client with a different private token.
    ///
    /// The returned client starts without a session.
    pub fn with_private_token(&self, token: impl Into<PrivateToken>) -> Self {
        let mut config = self.inner.config.clone();
        config.private_token = Some(token.into());
        Self::from_parts(config, self.inner.base_url.clone(), self.inner.transport.clone())
    }

    /// Rebuild this client with a different application id.
    ///
    /// The returned client starts without a session.
    pub fn with_app_id(&self, app_id: impl Into<String>) -> Self {
        let mut config = self.inner.config.clone();
        config.app_id = Some(app_id.into());
        Self::from_parts(config, self.inner.base_url.clone(), self.inner.transport.clone())
    }

    /// Resolve a path relative to the versioned API base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::configuration(format!("invalid request path '{path}': {e}")))
    }

    /// Resolve a path relative to the router origin.
    pub(crate) fn origin_url(&self, path: &str) -> Result<Url> {
        self.inner
            .config
            .endpoint
            .join(path)
            .map_err(|e| Error::configuration(format!("invalid request path '{path}': {e}")))
    }
}
