use crate::client::{ApiRequest, Client};
use crate::types::{DownloadRequest, DownloadTask, DownloadTaskUpdate, TaskId};
use crate::Result;

impl Client {
    pub async fn list_download_tasks(&self) -> Result<Vec<DownloadTask>> {
        let tasks: Option<Vec<DownloadTask>> =
            self.execute(ApiRequest::get("downloads/")).await?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn get_download_task(&self, id: i64) -> Result<DownloadTask> {
        self.execute(ApiRequest::get(format!("downloads/{id}"))).await
    }

    /// Queue a download; returns the new task id.
    ///
    /// This endpoint only accepts a form-encoded body.
    pub async fn add_download_task(&self, request: &DownloadRequest) -> Result<i64> {
        let task: TaskId = self
            .execute(ApiRequest::post("downloads/add").with_form(request)?)
            .await?;
        Ok(task.id)
    }

    /// Remove the task, keeping downloaded files.
    pub async fn delete_download_task(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("downloads/{id}"))).await
    }

    /// Remove the task and its downloaded files.
    pub async fn erase_download_task(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("downloads/{id}/erase")))
            .await
    }

    pub async fn update_download_task(
        &self,
        id: i64,
        update: &DownloadTaskUpdate,
    ) -> Result<DownloadTask> {
        self.execute(ApiRequest::put(format!("downloads/{id}")).with_json(update)?)
            .await
    }
}
