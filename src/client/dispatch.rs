//! 请求分发：附加会话、编码负载、解码信封，认证失败时续期并重试一次。
//!
//! Request dispatch.
//!
//! Every JSON call goes through [`Client::execute`]. Authenticated calls are
//! wrapped by [`Client::authenticated`], which attaches the cached session
//! (performing a handshake if none exists) and, when the router rejects the
//! session, renews it once and retries once.

use super::core::Client;
use crate::envelope;
use crate::error::Error;
use crate::session::{Session, SESSION_HEADER};
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody};
use crate::Result;
use bytes::Bytes;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Request payload, already encoded into its wire representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(String),
}

/// A JSON API call relative to the versioned base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: Payload::None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let value = serde_json::to_value(payload)
            .map_err(|e| Error::Serialization(format!("failed to encode request payload: {e}")))?;
        self.payload = Payload::Json(value);
        Ok(self)
    }

    pub fn with_form<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let form = serde_urlencoded::to_string(payload)
            .map_err(|e| Error::Serialization(format!("failed to encode form payload: {e}")))?;
        self.payload = Payload::Form(form);
        Ok(self)
    }

    /// Send without a session (login challenge, authorization).
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

impl Client {
    /// Execute one API call and decode its `result` into `T`.
    ///
    /// Authenticated requests get the single renew-and-retry described on
    /// [`Client::authenticated`].
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        if !request.authenticated {
            return self.execute_once(&request, None).await;
        }
        let request = &request;
        self.authenticated(|session| async move {
            self.execute_once(request, Some(session.as_ref())).await
        })
        .await
    }

    /// Execute a call whose `result`, if any, carries nothing the caller needs.
    pub(crate) async fn execute_unit(&self, request: ApiRequest) -> Result<()> {
        let _: IgnoredAny = self.execute(request).await?;
        Ok(())
    }

    /// Run `op` with a valid session.
    ///
    /// If `op` fails with [`Error::AuthRequired`], the session is renewed once
    /// and `op` is retried once. When renewal itself fails, configuration
    /// errors are returned as is and any other failure yields the original
    /// error.
    pub(crate) async fn authenticated<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(Arc<Session>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = self.ensure_session().await?;
        match op(session.clone()).await {
            Err(Error::AuthRequired(api)) => {
                info!(error_code = api.code.as_str(), "session rejected, renewing");
                match self.renew_session(&session).await {
                    Ok(fresh) => op(fresh).await,
                    Err(e) if e.is_configuration() => Err(e),
                    Err(e) => {
                        warn!(error = %e, "session renewal failed");
                        Err(Error::AuthRequired(api))
                    }
                }
            }
            other => other,
        }
    }

    /// A single attempt: no renewal, no retry.
    pub(crate) async fn execute_once<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        session: Option<&Session>,
    ) -> Result<T> {
        let url = self.api_url(&request.path)?;
        let mut http = self.http_request(request.method, url, session);
        http = match &request.payload {
            Payload::None => http,
            Payload::Json(value) => {
                let body = serde_json::to_vec(value).map_err(|e| {
                    Error::Serialization(format!("failed to encode request payload: {e}"))
                })?;
                http.with_header("Content-Type", CONTENT_TYPE_JSON)
                    .with_body(RequestBody::Bytes(Bytes::from(body)))
            }
            Payload::Form(form) => http
                .with_header("Content-Type", CONTENT_TYPE_FORM)
                .with_body(RequestBody::Bytes(Bytes::from(form.clone()))),
        };

        let context = format!("failed to {} {} endpoint", request.method, request.path);
        let response = self.send(http, &context).await?;
        let status = response.status;
        let body = response
            .body
            .bytes()
            .await
            .map_err(|e| Error::network(format!("{context}: failed to read response body"), e))?;

        envelope::decode(status, &body).map_err(|e| {
            info!(
                http_status = status,
                endpoint = request.path.as_str(),
                error_code = e.error_code().unwrap_or(""),
                "freebox request failed"
            );
            e
        })
    }

    /// Base request with the session header attached when present.
    pub(crate) fn http_request(
        &self,
        method: Method,
        url: Url,
        session: Option<&Session>,
    ) -> HttpRequest {
        let request = HttpRequest::new(method, url);
        match session {
            Some(session) => request.with_header(SESSION_HEADER, session.token()),
            None => request,
        }
    }

    /// Hand a request to the transport, mapping failures to [`Error::Network`].
    pub(crate) async fn send(&self, request: HttpRequest, context: &str) -> Result<HttpResponse> {
        let request_id = Uuid::new_v4().to_string();
        let method = request.method;
        let path = request.url.path().to_string();
        debug!(
            request_id = request_id.as_str(),
            method = method.as_str(),
            path = path.as_str(),
            "dispatching request"
        );
        let response = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(|e| Error::network(context, e))?;
        debug!(
            request_id = request_id.as_str(),
            http_status = response.status,
            "response received"
        );
        Ok(response)
    }
}

/// Fail a raw (non-JSON) response that did not succeed.
///
/// The body is still run through envelope decoding so business errors keep
/// their code.
pub(crate) async fn reject_unsuccessful(response: HttpResponse, context: &str) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let status = response.status;
    let body = response
        .body
        .bytes()
        .await
        .map_err(|e| Error::network(format!("{context}: failed to read response body"), e))?;
    match envelope::decode::<Value>(status, &body) {
        Err(e) => Err(e),
        // decode never succeeds on a non-2xx status
        Ok(_) => Err(Error::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}
