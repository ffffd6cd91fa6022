//! Shared fixtures: a mockito server with the login flow, and fake transports.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use freebox_client::session::{password_hash, PrivateToken};
use freebox_client::transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use freebox_client::Client;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const VERSION: &str = "v8";
pub const APP_ID: &str = "fr.freebox.test";
pub const PRIVATE_TOKEN: &str = "dyNYgfK0Ya6FWGqq83sBHa7TwzWo+pg4fDFUJHShcjVYzTfaRrZzm93p7OTAfH/0";
pub const CHALLENGE: &str = "VzhbtpR4r8CLaJle2QgJBEkyd8JPb0zL";
pub const SESSION_TOKEN: &str = "35JYdQSvkcBYK84IFMU7H86clfhS75OzwlQrKlQN1gBchDd62RGzDpgC7YB9jB2";

pub fn api_path(path: &str) -> String {
    format!("/api/{VERSION}/{path}")
}

pub fn ok_body(result: serde_json::Value) -> String {
    json!({ "success": true, "result": result }).to_string()
}

pub fn error_body(code: &str, msg: &str) -> String {
    json!({ "success": false, "error_code": code, "msg": msg }).to_string()
}

/// Test fixture that manages a mock server.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client with credentials pointed at the mock server.
    pub fn client(&self) -> Client {
        Client::builder(&self.base_url, VERSION)
            .app_id(APP_ID)
            .private_token(PRIVATE_TOKEN)
            .build()
            .expect("client")
    }

    /// Client without credentials.
    pub fn anonymous_client(&self) -> Client {
        Client::builder(&self.base_url, VERSION).build().expect("client")
    }

    /// Mock the challenge and session exchange granting [`SESSION_TOKEN`].
    ///
    /// Keep the returned mocks alive for the duration of the test.
    pub async fn mock_login(&mut self) -> (Mock, Mock) {
        self.mock_login_with_permissions(json!({ "settings": true })).await
    }

    pub async fn mock_login_with_permissions(&mut self, permissions: serde_json::Value) -> (Mock, Mock) {
        let challenge = self
            .server
            .mock("GET", api_path("login/").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ok_body(json!({
                "logged_in": false,
                "challenge": CHALLENGE,
                "password_salt": "PMsGHCfAu6ZzyDLVrLJjKQAt8Y02dfYH",
                "password_set": true
            })))
            .create_async()
            .await;

        let password = password_hash(&PrivateToken::new(PRIVATE_TOKEN), CHALLENGE).expect("hmac");
        let session = self
            .server
            .mock("POST", api_path("login/session/").as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "app_id": APP_ID, "password": password })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ok_body(json!({
                "session_token": SESSION_TOKEN,
                "challenge": CHALLENGE,
                "permissions": permissions
            })))
            .create_async()
            .await;

        (challenge, session)
    }

    /// Mock an authenticated JSON endpoint.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: String) -> Mock {
        self.server
            .mock(method, api_path(path).as_str())
            .match_header("X-Fbx-App-Auth", SESSION_TOKEN)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

/// A request as seen by a fake transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default()).expect("json body")
    }
}

/// Answers requests from a fixed script, in order, and records them.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        let body: String = body.into();
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn respond_ok(&self, result: serde_json::Value) -> &Self {
        self.respond(200, ok_body(result))
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Script a complete handshake granting `token`.
    pub fn login(&self, token: &str) -> &Self {
        self.respond_ok(json!({ "logged_in": false, "challenge": CHALLENGE }))
            .respond_ok(json!({ "session_token": token, "permissions": { "settings": true } }))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn client(self: &Arc<Self>) -> Client {
        Client::builder("127.0.0.1:9", VERSION)
            .app_id(APP_ID)
            .private_token(PRIVATE_TOKEN)
            .transport(self.clone())
            .build()
            .expect("client")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.to_string(),
            headers: request.headers.clone(),
            body: request.body_bytes().cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".into())))
    }
}

/// Counts calls and fails every one of them.
#[derive(Default)]
pub struct CountingTransport {
    calls: AtomicUsize,
}

impl CountingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Other("unexpected call".into()))
    }
}

/// Never answers.
pub struct StallingTransport;

#[async_trait]
impl HttpTransport for StallingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        std::future::pending().await
    }
}
