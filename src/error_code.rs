//! 错误码分类：将上游业务错误码映射为少量可匹配的类别。
//!
//! Upstream error code classification.
//!
//! The router reports business failures as short machine tokens inside the
//! envelope. A few of them are promoted to dedicated [`Error`] variants so
//! callers can match on them:
//!
//! | Class | Codes | Variant |
//! |-------|-------|---------|
//! | not found | `noent`, `not_found`, `path_not_found`, `task_not_found`, `no_such_task`, `no_such_vm` | [`Error::NotFound`] |
//! | conflict | `destination_conflict`, `exists`, `conflict` | [`Error::Conflict`] |
//! | authentication | `auth_required`, `invalid_token`, `invalid_session` | [`Error::AuthRequired`] |
//!
//! Anything else stays an [`Error::Api`] with the code and message verbatim.

use crate::error::{ApiError, Error};
use std::fmt;

pub const NO_ENTRY: &str = "noent";
pub const NOT_FOUND: &str = "not_found";
pub const PATH_NOT_FOUND: &str = "path_not_found";
pub const TASK_NOT_FOUND: &str = "task_not_found";
pub const NO_SUCH_TASK: &str = "no_such_task";
pub const NO_SUCH_VM: &str = "no_such_vm";
pub const DESTINATION_CONFLICT: &str = "destination_conflict";
pub const EXISTS: &str = "exists";
pub const CONFLICT: &str = "conflict";
pub const AUTH_REQUIRED: &str = "auth_required";
pub const INVALID_TOKEN: &str = "invalid_token";
pub const INVALID_SESSION: &str = "invalid_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    NotFound,
    Conflict,
    Authentication,
    Other,
}

impl ErrorClass {
    pub fn from_code(code: &str) -> Self {
        match code {
            NO_ENTRY | NOT_FOUND | PATH_NOT_FOUND | TASK_NOT_FOUND | NO_SUCH_TASK | NO_SUCH_VM => {
                Self::NotFound
            }
            DESTINATION_CONFLICT | EXISTS | CONFLICT => Self::Conflict,
            AUTH_REQUIRED | INVALID_TOKEN | INVALID_SESSION => Self::Authentication,
            _ => Self::Other,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Authentication => "authentication",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap a business error into the variant matching its class.
pub fn classify(api: ApiError) -> Error {
    match ErrorClass::from_code(&api.code) {
        ErrorClass::NotFound => Error::NotFound(api),
        ErrorClass::Conflict => Error::Conflict(api),
        ErrorClass::Authentication => Error::AuthRequired(api),
        ErrorClass::Other => Error::Api(api),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes_are_promoted() {
        for code in ["noent", "path_not_found", "task_not_found", "no_such_vm"] {
            assert!(
                matches!(classify(ApiError::new(code, "")), Error::NotFound(_)),
                "{code} should be not-found"
            );
        }
        assert!(matches!(
            classify(ApiError::new("destination_conflict", "")),
            Error::Conflict(_)
        ));
        for code in ["auth_required", "invalid_token", "invalid_session"] {
            assert!(matches!(classify(ApiError::new(code, "")), Error::AuthRequired(_)));
        }
    }

    #[test]
    fn unknown_code_is_preserved_verbatim() {
        let err = classify(ApiError::new("ratelimited", "Trop de requêtes"));
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, "ratelimited");
                assert_eq!(api.message, "Trop de requêtes");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn empty_code_is_other() {
        assert_eq!(ErrorClass::from_code(""), ErrorClass::Other);
    }
}
