use serde::{Deserialize, Serialize};

/// Answer of the unauthenticated `api_version` endpoint.
///
/// This endpoint is not wrapped in the usual envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVersion {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub device_name: String,
    /// e.g. `"8.0"`.
    pub api_version: String,
    /// e.g. `"/api/"`.
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub api_domain: String,
    #[serde(default)]
    pub https_available: bool,
    #[serde(default)]
    pub https_port: u16,
}

impl ApiVersion {
    /// The version path segment used in API URLs (`"8.0"` → `"v8"`).
    pub fn version_segment(&self) -> String {
        let major = self.api_version.split('.').next().unwrap_or_default();
        format!("v{major}")
    }
}

/// Identifier returned by endpoints that start a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId {
    pub id: i64,
}
