//! Filesystem facade.
//!
//! Paths are plain strings at this boundary; they are base64 encoded on the
//! wire, both in URL segments and in payloads.

use super::encode_path;
use crate::client::dispatch::reject_unsuccessful;
use crate::client::{ApiRequest, Client};
use crate::transport::Method;
use crate::types::{
    Base64Path, ExtractPayload, File, FileInfo, FileSystemTask, FileSystemTaskUpdate,
    FileTransferPayload, HashPayload,
};
use crate::Result;
use serde_json::json;

impl Client {
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) (`path_not_found`)
    /// for a missing path.
    pub async fn get_file_info(&self, path: &str) -> Result<FileInfo> {
        self.execute(ApiRequest::get(format!("fs/info/{}", encode_path(path))))
            .await
    }

    /// Start removing `paths`; returns the tracking task.
    pub async fn remove_files<S: AsRef<str>>(&self, paths: &[S]) -> Result<FileSystemTask> {
        let files: Vec<Base64Path> = paths.iter().map(|p| Base64Path::new(p.as_ref())).collect();
        self.execute(ApiRequest::post("fs/rm/").with_json(&json!({ "files": files }))?)
            .await
    }

    pub async fn list_file_system_tasks(&self) -> Result<Vec<FileSystemTask>> {
        let tasks: Option<Vec<FileSystemTask>> =
            self.execute(ApiRequest::get("fs/tasks/")).await?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn get_file_system_task(&self, id: i64) -> Result<FileSystemTask> {
        self.execute(ApiRequest::get(format!("fs/tasks/{id}"))).await
    }

    /// Pause or resume a task.
    pub async fn update_file_system_task(
        &self,
        id: i64,
        update: &FileSystemTaskUpdate,
    ) -> Result<FileSystemTask> {
        self.execute(ApiRequest::put(format!("fs/tasks/{id}")).with_json(update)?)
            .await
    }

    /// Fails with [`Error::NotFound`](crate::Error::NotFound) (`task_not_found`)
    /// for an unknown id.
    pub async fn delete_file_system_task(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("fs/tasks/{id}")))
            .await
    }

    /// Create `name` under `parent` and return the new directory's path.
    ///
    /// Fails with [`Error::Conflict`](crate::Error::Conflict)
    /// (`destination_conflict`) if it already exists.
    pub async fn create_directory(&self, parent: &str, name: &str) -> Result<String> {
        let payload = json!({
            "parent": Base64Path::new(parent),
            "dirname": name,
        });
        let created: Base64Path = self
            .execute(ApiRequest::post("fs/mkdir/").with_json(&payload)?)
            .await?;
        Ok(created.into_inner())
    }

    pub async fn add_hash_file_task(&self, payload: &HashPayload) -> Result<FileSystemTask> {
        self.execute(ApiRequest::post("fs/hash/").with_json(payload)?)
            .await
    }

    /// Hex digest computed by a finished hash task.
    pub async fn get_hash_result(&self, id: i64) -> Result<String> {
        self.execute(ApiRequest::get(format!("fs/tasks/{id}/hash/")))
            .await
    }

    pub async fn move_files(&self, payload: &FileTransferPayload) -> Result<FileSystemTask> {
        self.execute(ApiRequest::post("fs/mv/").with_json(payload)?)
            .await
    }

    pub async fn copy_files(&self, payload: &FileTransferPayload) -> Result<FileSystemTask> {
        self.execute(ApiRequest::post("fs/cp/").with_json(payload)?)
            .await
    }

    pub async fn extract_file(&self, payload: &ExtractPayload) -> Result<FileSystemTask> {
        self.execute(ApiRequest::post("fs/extract/").with_json(payload)?)
            .await
    }

    /// Download a file. The body is streamed from [`File::content`].
    ///
    /// Failed responses are still decoded as envelopes, so business errors
    /// keep their code and an expired session is renewed once.
    pub async fn get_file(&self, path: &str) -> Result<File> {
        let segment = format!("dl/{}", encode_path(path));
        let url = self.api_url(&segment)?;
        let context = format!("failed to GET {segment} endpoint");
        let context = context.as_str();

        let response = self
            .authenticated(|session| {
                let request = self.http_request(Method::Get, url.clone(), Some(session.as_ref()));
                async move {
                    let response = self.send(request, context).await?;
                    reject_unsuccessful(response, context).await
                }
            })
            .await?;

        let content_type = response
            .header("Content-Type")
            .map(media_type)
            .unwrap_or_default();
        let file_name = response
            .header("Content-Disposition")
            .and_then(disposition_filename)
            .unwrap_or_default();
        Ok(File {
            content_type,
            file_name,
            content: response.body,
        })
    }
}

/// `text/plain; charset=utf-8` → `text/plain`.
fn media_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// The `filename` parameter of a `Content-Disposition` header.
fn disposition_filename(header: &str) -> Option<String> {
    header.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Some(value.replace("\\\"", "\""))
    })
}
