//! 响应信封：所有接口共享的 `{success, result, error_code, msg}` 外层结构。
//!
//! Universal response envelope.
//!
//! Every JSON endpoint answers with the same outer object. Decoding happens in
//! two steps: the body is parsed as an `Envelope<Value>`, then `result` is
//! projected into the caller's type. This keeps envelope-level failures
//! (business errors) distinct from shape mismatches (decoding errors).

use crate::error::{ApiError, Error};
use crate::error_code;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: Some(true),
            result: Some(result),
            error_code: None,
            msg: None,
            uid: None,
        }
    }

    /// `success` present and true; an absent flag counts as a failure.
    pub fn succeeded(&self) -> bool {
        self.success == Some(true)
    }

    /// Carries `success` or `error_code`, as opposed to any JSON object.
    pub fn is_envelope(&self) -> bool {
        self.success.is_some() || self.error_code.is_some()
    }

    /// The business error carried by a failed envelope.
    pub fn api_error(&self) -> ApiError {
        ApiError {
            code: self.error_code.clone().unwrap_or_default(),
            message: self.msg.clone().unwrap_or_default(),
            uid: self.uid.clone(),
        }
    }
}

/// Decode a raw response into the typed `result`.
///
/// Envelope decoding is always attempted first, whatever the status:
/// - unparseable body, or an object with neither `success` nor `error_code`,
///   on a non-2xx status → [`Error::Status`] with the raw body;
/// - unparseable body on a 2xx status → [`Error::Decoding`];
/// - `success: false` → classified business error;
/// - `success: true` on a non-2xx status → [`Error::Status`];
/// - otherwise `result` (or `null` when absent) is decoded into `T`.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let envelope = parse(status, body)?;
    into_result(status, body, envelope)
}

/// Parse the outer envelope only.
pub fn parse(status: u16, body: &[u8]) -> Result<Envelope> {
    let ok = is_success(status);
    match serde_json::from_slice::<Envelope>(body) {
        Ok(envelope) if ok || envelope.is_envelope() => Ok(envelope),
        Ok(_) => Err(status_error(status, body)),
        Err(_) if !ok => Err(status_error(status, body)),
        Err(e) => Err(Error::decoding(
            format!(
                "failed to unmarshal response body '{}'",
                String::from_utf8_lossy(body)
            ),
            e,
        )),
    }
}

/// Turn a parsed envelope into the typed result or the error it carries.
pub fn into_result<T: DeserializeOwned>(status: u16, body: &[u8], envelope: Envelope) -> Result<T> {
    if !envelope.succeeded() {
        return Err(error_code::classify(envelope.api_error()));
    }
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    let result = envelope.result.unwrap_or(Value::Null);
    serde_json::from_value(result)
        .map_err(|e| Error::decoding("failed to decode envelope result", e))
}

fn status_error(status: u16, body: &[u8]) -> Error {
    Error::Status {
        status,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[inline]
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn success_projects_result() {
        let item: Item = decode(200, br#"{"success":true,"result":{"id":3}}"#).unwrap();
        assert_eq!(item, Item { id: 3 });
    }

    #[test]
    fn absent_result_decodes_as_unit() {
        let _: () = decode(200, br#"{"success":true}"#).unwrap();
        let list: Option<Vec<Item>> = decode(200, br#"{"success":true}"#).unwrap();
        assert!(list.is_none());
    }

    #[test]
    fn ignored_result_accepts_any_shape() {
        let body = br#"{"success":true,"result":{"id":4}}"#;
        assert!(decode::<IgnoredAny>(200, body).is_ok());
        assert!(decode::<IgnoredAny>(200, br#"{"success":true,"result":[1,2]}"#).is_ok());
        assert!(decode::<IgnoredAny>(200, br#"{"success":true}"#).is_ok());

        let err = decode::<IgnoredAny>(200, br#"{"success":false,"error_code":"noent"}"#).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn list_for_object_is_a_decoding_error() {
        let err = decode::<Item>(200, br#"{"success":true,"result":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }), "{err:?}");
    }

    #[test]
    fn failed_envelope_is_classified_at_any_status() {
        let body = r#"{"success":false,"error_code":"noent","msg":"Aucune entrée"}"#.as_bytes();
        assert!(matches!(decode::<Item>(200, body), Err(Error::NotFound(_))));
        assert!(matches!(decode::<Item>(404, body), Err(Error::NotFound(_))));

        let body = br#"{"success":false,"error_code":"bad_request","msg":"some error"}"#;
        match decode::<Item>(400, body) {
            Err(Error::Api(api)) => {
                assert_eq!(api.code, "bad_request");
                assert_eq!(api.message, "some error");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_depends_on_status() {
        match decode::<Item>(502, b"test body") {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "test body");
            }
            other => panic!("unexpected {other:?}"),
        }
        let err = decode::<Item>(200, b"{").unwrap_err();
        assert!(err.to_string().starts_with("failed to unmarshal response body '{'"));
    }

    #[test]
    fn foreign_json_on_error_status_keeps_body() {
        match decode::<Value>(503, br#"{"detail":"upstream down"}"#) {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, r#"{"detail":"upstream down"}"#);
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = decode::<Value>(403, br#"{"error_code":"auth_required"}"#).unwrap_err();
        assert!(matches!(err, Error::AuthRequired(_)), "{err:?}");
    }

    #[test]
    fn successful_envelope_on_error_status_keeps_status() {
        let err = decode::<Item>(500, br#"{"success":true,"result":{"id":1}}"#).unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
    }

    #[test]
    fn missing_success_flag_is_a_failure() {
        let err = decode::<Item>(200, br#"{"result":{"id":1}}"#).unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }
}
