//! Filesystem types.

use super::fields::Base64Path;
use crate::transport::ResponseBody;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Dir,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub path: Base64Path,
    pub name: String,
    #[serde(default)]
    pub mimetype: String,
    #[serde(rename = "type", default)]
    pub file_type: FileType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modification: i64,
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub link: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Base64Path>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub foldercount: u64,
    #[serde(default)]
    pub filecount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSystemTaskType {
    Cp,
    Mv,
    Rm,
    Archive,
    Extract,
    Repair,
    Hash,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSystemTaskState {
    #[default]
    Queued,
    Running,
    Paused,
    Done,
    Failed,
}

/// A long-running filesystem operation tracked by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemTask {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: FileSystemTaskType,
    #[serde(default)]
    pub state: FileSystemTaskState,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub created_ts: i64,
    #[serde(default)]
    pub started_ts: i64,
    #[serde(default)]
    pub done_ts: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub eta: i64,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub nfiles: u64,
    #[serde(default)]
    pub nfiles_done: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub total_bytes_done: u64,
    #[serde(default)]
    pub curr_bytes: u64,
    #[serde(default)]
    pub curr_bytes_done: u64,
    #[serde(default)]
    pub rate: u64,
}

/// Update of a filesystem task (pause or resume).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemTaskUpdate {
    pub state: FileSystemTaskState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashPayload {
    pub src: Base64Path,
    pub hash_type: HashType,
}

/// What to do when a copy or move destination already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictMode {
    Overwrite,
    Both,
    #[default]
    Skip,
    Recent,
}

/// Payload shared by move and copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTransferPayload {
    pub files: Vec<Base64Path>,
    pub dst: Base64Path,
    #[serde(default)]
    pub mode: ConflictMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractPayload {
    pub src: Base64Path,
    pub dst: Base64Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub delete_archive: bool,
    #[serde(default)]
    pub overwrite: bool,
}

/// A downloaded file. `content` streams the body.
#[derive(Debug)]
pub struct File {
    /// Media type without parameters, empty when absent.
    pub content_type: String,
    /// Filename from `Content-Disposition`, empty when absent.
    pub file_name: String,
    pub content: ResponseBody,
}
