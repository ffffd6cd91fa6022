use super::core::{Client, ClientConfig};
use crate::error::Error;
use crate::session::PrivateToken;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Builder for [`Client`].
///
/// Keep this surface small: endpoint and version are required, everything
/// else has a default.
pub struct ClientBuilder {
    endpoint: String,
    version: String,
    app_id: Option<String>,
    private_token: Option<PrivateToken>,
    transport: Option<Arc<dyn HttpTransport>>,
    timeout: Option<Duration>,
    session_ttl: Duration,
}

impl ClientBuilder {
    pub fn new(endpoint: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            version: version.into(),
            app_id: None,
            private_token: None,
            transport: None,
            timeout: Some(DEFAULT_TIMEOUT),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Application id registered with the router.
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Private token obtained through authorization.
    pub fn private_token(mut self, token: impl Into<PrivateToken>) -> Self {
        self.private_token = Some(token.into());
        self
    }

    /// Inject a transport. Default is a [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Per-request timeout of the default transport. `None` disables it.
    ///
    /// Ignored when a transport is injected.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validity window recorded on new sessions (default 30 minutes).
    ///
    /// The router's session grant carries no lifetime, so this is a local
    /// estimate behind [`Session::is_expired`](crate::session::Session::is_expired).
    /// Renewal still happens only when the router rejects the session.
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let endpoint = normalize_endpoint(&self.endpoint)?;

        let version = self.version.trim().trim_matches('/').to_string();
        if version.is_empty() {
            return Err(Error::configuration("API version must not be empty"));
        }
        let base_url = endpoint
            .join(&format!("api/{version}/"))
            .map_err(|e| Error::configuration(format!("invalid API version '{version}': {e}")))?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(self.timeout).map_err(|e| {
                Error::configuration(format!("failed to build HTTP transport: {e}"))
            })?),
        };

        let config = ClientConfig {
            endpoint,
            version,
            app_id: self.app_id,
            private_token: self.private_token,
            timeout: self.timeout,
            session_ttl: self.session_ttl,
        };
        Ok(Client::from_parts(config, base_url, transport))
    }
}

/// Parse the endpoint, defaulting to `http://` and ending the path with `/`.
fn normalize_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::configuration("endpoint must not be empty"));
    }
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    let mut url = Url::parse(&with_scheme)
        .map_err(|e| Error::configuration(format!("invalid endpoint '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "unsupported endpoint scheme '{}'",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
