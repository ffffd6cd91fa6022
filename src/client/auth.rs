//! 认证握手：挑战、HMAC 密码、会话令牌；续期与注销。
//!
//! Login handshake, renewal, logout and application authorization.

use super::core::Client;
use super::dispatch::ApiRequest;
use crate::error::Error;
use crate::session::{
    self, Authorization, AuthorizationRequest, AuthorizationStatus, Challenge, Permissions,
    Session, SessionGrant, SessionRequest,
};
use crate::transport::Method;
use crate::types::ApiVersion;
use crate::Result;
use serde::de::IgnoredAny;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl Client {
    /// Perform the login handshake and return the granted permissions.
    ///
    /// Always handshakes, replacing any cached session. Never retries.
    pub async fn login(&self) -> Result<Permissions> {
        let _guard = self.inner.session.lock().await;
        let (_, permissions) = self.handshake().await?;
        Ok(permissions)
    }

    /// Close the session.
    ///
    /// The local session is cleared before the request is sent, so it is gone
    /// even when the router cannot be reached. The network outcome is still
    /// returned.
    pub async fn logout(&self) -> Result<()> {
        let Some(session) = self.inner.session.clear() else {
            return Ok(());
        };
        let request = ApiRequest::post("login/logout/");
        self.execute_once::<IgnoredAny>(&request, Some(session.as_ref()))
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "logout request failed, local session cleared");
                e
            })
    }

    /// Register an application; the user must confirm it on the router.
    ///
    /// Poll [`Client::authorization_status`] with the returned track id.
    pub async fn authorize(&self, request: &AuthorizationRequest) -> Result<Authorization> {
        self.execute(
            ApiRequest::post("login/authorize/")
                .with_json(request)?
                .unauthenticated(),
        )
        .await
    }

    pub async fn authorization_status(&self, track_id: i64) -> Result<AuthorizationStatus> {
        self.execute(ApiRequest::get(format!("login/authorize/{track_id}")).unauthenticated())
            .await
    }

    /// Query `{endpoint}/api_version`. This answer is not enveloped.
    pub async fn api_version(&self) -> Result<ApiVersion> {
        let url = self.origin_url("api_version")?;
        let context = "failed to GET api_version endpoint";
        let response = self
            .send(self.http_request(Method::Get, url, None), context)
            .await?;
        let status = response.status;
        let body = response
            .body
            .bytes()
            .await
            .map_err(|e| Error::network(format!("{context}: failed to read response body"), e))?;
        if !(200..300).contains(&status) {
            return Err(Error::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        serde_json::from_slice(&body).map_err(|e| {
            Error::decoding(
                format!(
                    "failed to unmarshal response body '{}'",
                    String::from_utf8_lossy(&body)
                ),
                e,
            )
        })
    }

    /// The cached session, or a new one from a handshake.
    pub(crate) async fn ensure_session(&self) -> Result<Arc<Session>> {
        if let Some(current) = self.inner.session.current() {
            return Ok(current);
        }
        let _guard = self.inner.session.lock().await;
        // another caller may have completed a handshake while we waited
        if let Some(current) = self.inner.session.current() {
            return Ok(current);
        }
        let (session, _) = self.handshake().await?;
        Ok(session)
    }

    /// Replace `stale` with a fresh session.
    ///
    /// Reuses a session installed by a concurrent renewal instead of
    /// handshaking again.
    pub(crate) async fn renew_session(&self, stale: &Arc<Session>) -> Result<Arc<Session>> {
        let _guard = self.inner.session.lock().await;
        if let Some(current) = self.inner.session.current() {
            if !Arc::ptr_eq(&current, stale) {
                debug!("session already renewed by a concurrent call");
                return Ok(current);
            }
        }
        info!("renewing session");
        let (session, _) = self.handshake().await?;
        Ok(session)
    }

    /// Challenge, password derivation and token exchange.
    ///
    /// Callers hold the session lock. The store is only updated after the
    /// exchange completes.
    async fn handshake(&self) -> Result<(Arc<Session>, Permissions)> {
        let config = &self.inner.config;
        let app_id = config
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(Error::AppIdNotSet)?;
        let private_token = config
            .private_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .ok_or(Error::PrivateTokenNotSet)?;

        let challenge: Challenge = self
            .execute_once(&ApiRequest::get("login/").unauthenticated(), None)
            .await?;

        let password = session::password_hash(private_token, &challenge.challenge)?;
        let request = ApiRequest::post("login/session/")
            .with_json(&SessionRequest { app_id, password })?
            .unauthenticated();
        let grant: SessionGrant = self.execute_once(&request, None).await?;

        let session = self
            .inner
            .session
            .replace(Session::new(grant.session_token, config.session_ttl));
        debug!(app_id, "session established");
        Ok((session, grant.permissions))
    }
}
