use super::encode_path;
use crate::client::{ApiRequest, Client};
use crate::types::{
    TaskId, VirtualDiskCreatePayload, VirtualDiskInfo, VirtualDiskResizePayload, VirtualDiskTask,
};
use crate::Result;

impl Client {
    pub async fn get_virtual_disk_info(&self, path: &str) -> Result<VirtualDiskInfo> {
        self.execute(ApiRequest::get(format!("vm/disk/info/{}", encode_path(path))))
            .await
    }

    pub async fn get_virtual_disk_task(&self, id: i64) -> Result<VirtualDiskTask> {
        self.execute(ApiRequest::get(format!("vm/disk/task/{id}")))
            .await
    }

    /// Start creating a disk; returns the task id.
    pub async fn create_virtual_disk(&self, payload: &VirtualDiskCreatePayload) -> Result<i64> {
        let task: TaskId = self
            .execute(ApiRequest::post("vm/disk/create").with_json(payload)?)
            .await?;
        Ok(task.id)
    }

    /// Start resizing a disk; returns the task id.
    pub async fn resize_virtual_disk(&self, payload: &VirtualDiskResizePayload) -> Result<i64> {
        let task: TaskId = self
            .execute(ApiRequest::post("vm/disk/resize").with_json(payload)?)
            .await?;
        Ok(task.id)
    }

    pub async fn delete_virtual_disk_task(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("vm/disk/task/{id}")))
            .await
    }
}
