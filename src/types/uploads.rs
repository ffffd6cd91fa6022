use super::fields::Base64Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Authorized,
    InProgress,
    Done,
    Cancelled,
    Conflict,
    Timeout,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub id: i64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub uploaded: u64,
    #[serde(default)]
    pub status: UploadStatus,
    #[serde(default)]
    pub start_date: i64,
    #[serde(default)]
    pub last_update: i64,
    #[serde(default)]
    pub upload_name: String,
    #[serde(default)]
    pub dirname: String,
}

/// Reservation of a new upload slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStartPayload {
    pub dirname: Base64Path,
    pub upload_name: String,
}
