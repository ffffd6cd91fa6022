//! 会话：登录挑战、权限、会话令牌与 HMAC-SHA1 密码派生。
//!
//! Session state and the login handshake data.
//!
//! A [`Session`] is produced by a completed handshake and is never mutated:
//! renewal swaps a new `Arc<Session>` into the [`SessionStore`].

use crate::error::Error;
use crate::Result;
use arc_swap::ArcSwapOption;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, MutexGuard};

/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "X-Fbx-App-Auth";

/// Application token granted by the router. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateToken(String);

impl PrivateToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PrivateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateToken(***)")
    }
}

impl From<&str> for PrivateToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PrivateToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Login challenge returned by `GET login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(default)]
    pub logged_in: bool,
    pub challenge: String,
    #[serde(default)]
    pub password_salt: String,
    #[serde(default)]
    pub password_set: bool,
}

/// Permission flags granted to the session. Unlisted flags are false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub parental: bool,
    pub player: bool,
    pub explorer: bool,
    pub tv: bool,
    pub wdo: bool,
    pub downloader: bool,
    pub profile: bool,
    pub camera: bool,
    pub settings: bool,
    pub calls: bool,
    pub home: bool,
    pub pvr: bool,
    pub vm: bool,
    pub contacts: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SessionRequest<'a> {
    pub app_id: &'a str,
    pub password: String,
}

/// Answer of `POST login/session/`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionGrant {
    pub session_token: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Application registration sent to `POST login/authorize/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub app_id: String,
    pub app_name: String,
    pub app_version: String,
    pub device_name: String,
}

/// A pending application registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Authorization {
    #[serde(rename = "app_token")]
    pub private_token: PrivateToken,
    pub track_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationState {
    Unknown,
    Pending,
    Timeout,
    Granted,
    Denied,
}

/// Progress of an application registration, polled by track id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationStatus {
    pub status: AuthorizationState,
    #[serde(default)]
    pub challenge: String,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    expires_at: Instant,
}

impl Session {
    /// `ttl` is the client-side `session_ttl`; the router does not report one.
    pub fn new(token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: token.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Advisory only; the dispatcher does not renew on expiry.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Per-client session slot plus the lock serializing handshakes.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    current: ArcSwapOption<Session>,
    renewal: Mutex<()>,
}

impl SessionStore {
    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    pub fn replace(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.current.store(Some(session.clone()));
        session
    }

    pub fn clear(&self) -> Option<Arc<Session>> {
        self.current.swap(None)
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.renewal.lock().await
    }
}

/// `hex(HMAC-SHA1(key = private token, msg = challenge))`.
pub fn password_hash(private_token: &PrivateToken, challenge: &str) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(private_token.expose().as_bytes())
        .map_err(|e| Error::configuration(format!("invalid private token: {e}")))?;
    mac.update(challenge.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
