//! Upload facade.
//!
//! An upload is reserved with `POST upload/`, then the content is streamed to
//! `upload/{id}/send` by a spawned task while the caller writes chunks into a
//! [`FileUpload`].

use crate::client::{ApiRequest, Client};
use crate::envelope;
use crate::error::Error;
use crate::transport::{Method, RequestBody, TransportError};
use crate::types::{Base64Path, TaskId, Upload, UploadStartPayload};
use crate::Result;
use bytes::Bytes;
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

const UPLOAD_BUFFER: usize = 16;

/// Writer for an upload in progress.
///
/// Call [`FileUpload::finish`] to end the body and wait for the router's
/// answer. Dropping the handle without finishing also ends the body.
#[derive(Debug)]
pub struct FileUpload {
    id: i64,
    sender: Option<mpsc::Sender<Bytes>>,
    task: JoinHandle<Result<()>>,
}

impl FileUpload {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Queue a chunk of content. Waits while the transport is behind.
    pub async fn write(&mut self, chunk: impl Into<Bytes>) -> Result<()> {
        let Some(sender) = self.sender.as_ref() else {
            return Err(closed_stream());
        };
        sender.send(chunk.into()).await.map_err(|_| closed_stream())
    }

    /// End the body and return the outcome of the transfer.
    pub async fn finish(mut self) -> Result<()> {
        self.sender.take();
        match self.task.await {
            Ok(out) => out,
            Err(e) => Err(Error::network(
                "upload task failed",
                TransportError::Other(e.to_string()),
            )),
        }
    }
}

fn closed_stream() -> Error {
    Error::network(
        "failed to write upload content",
        TransportError::Other("upload stream closed".into()),
    )
}

impl Client {
    /// Reserve an upload of `file_name` into `dir` and open its body.
    ///
    /// The streamed body is sent once and is not retried on session expiry.
    pub async fn start_upload(&self, dir: &str, file_name: &str) -> Result<FileUpload> {
        let payload = UploadStartPayload {
            dirname: Base64Path::new(dir),
            upload_name: file_name.to_string(),
        };
        let TaskId { id } = self
            .execute(ApiRequest::post("upload/").with_json(&payload)?)
            .await?;

        let session = self.ensure_session().await?;
        let url = self.api_url(&format!("upload/{id}/send"))?;
        let (sender, receiver) = mpsc::channel::<Bytes>(UPLOAD_BUFFER);
        let body = ReceiverStream::new(receiver).map(Ok::<Bytes, TransportError>);
        let request = self
            .http_request(Method::Post, url, Some(session.as_ref()))
            .with_header("Content-Type", "application/octet-stream")
            .with_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file_name.replace('"', "\\\"")),
            )
            .with_body(RequestBody::Stream(Box::pin(body)));

        let client = self.clone();
        let task = tokio::spawn(async move {
            let context = format!("failed to POST upload/{id}/send endpoint");
            let response = client.send(request, &context).await?;
            let status = response.status;
            let body = response.body.bytes().await.map_err(|e| {
                Error::network(format!("{context}: failed to read response body"), e)
            })?;
            envelope::decode::<Value>(status, &body)?;
            debug!(upload_id = id, "upload finished");
            Ok(())
        });

        Ok(FileUpload {
            id,
            sender: Some(sender),
            task,
        })
    }

    pub async fn get_upload(&self, id: i64) -> Result<Upload> {
        self.execute(ApiRequest::get(format!("upload/{id}"))).await
    }

    pub async fn list_uploads(&self) -> Result<Vec<Upload>> {
        let uploads: Option<Vec<Upload>> = self.execute(ApiRequest::get("upload/")).await?;
        Ok(uploads.unwrap_or_default())
    }

    pub async fn cancel_upload(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("upload/{id}/cancel")))
            .await
    }

    pub async fn delete_upload(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("upload/{id}"))).await
    }

    /// Remove every finished upload from the list.
    pub async fn clean_uploads(&self) -> Result<()> {
        self.execute_unit(ApiRequest::delete("upload/clean")).await
    }
}
