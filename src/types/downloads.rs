use super::fields::Base64Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    #[default]
    Queued,
    Starting,
    Downloading,
    Stopping,
    Stopped,
    Error,
    Done,
    Checking,
    Repairing,
    Extracting,
    Seeding,
    Retry,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoPriority {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadTask {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub status: DownloadStatus,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub queue_pos: i64,
    #[serde(default)]
    pub io_priority: IoPriority,
    #[serde(default)]
    pub tx_bytes: u64,
    #[serde(default)]
    pub rx_bytes: u64,
    #[serde(default)]
    pub tx_rate: u64,
    #[serde(default)]
    pub rx_rate: u64,
    #[serde(default)]
    pub tx_pct: u32,
    #[serde(default)]
    pub rx_pct: u32,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub created_ts: i64,
    #[serde(default)]
    pub eta: i64,
    #[serde(default)]
    pub download_dir: Base64Path,
    #[serde(default)]
    pub stop_ratio: f64,
    #[serde(default)]
    pub archive_password: String,
    #[serde(default)]
    pub info_hash: String,
    #[serde(default)]
    pub piece_length: u64,
}

/// New download request, sent form-encoded.
///
/// Either `download_url` or `download_url_list` (newline separated) must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<Base64Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

impl DownloadRequest {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            download_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = urls
            .into_iter()
            .map(|u| u.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            download_url_list: Some(list),
            ..Default::default()
        }
    }

    pub fn into_dir(mut self, dir: impl Into<Base64Path>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadTaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_priority: Option<IoPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DownloadStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_pos: Option<i64>,
}
