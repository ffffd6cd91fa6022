mod common;

use common::*;
use freebox_client::types::{DownloadRequest, DownloadStatus, DownloadTaskUpdate, IoPriority};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn add_task_is_form_encoded() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let add = fixture
        .server
        .mock("POST", api_path("downloads/add").as_str())
        .match_header("X-Fbx-App-Auth", SESSION_TOKEN)
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Exact(
            "download_url=http%3A%2F%2Fexample.com%2Ffile.iso&download_dir=L0ZyZWVib3gvSVNP"
                .to_string(),
        ))
        .with_status(200)
        .with_body(ok_body(json!({ "id": 31 })))
        .create_async()
        .await;

    let id = fixture
        .client()
        .add_download_task(&DownloadRequest::url("http://example.com/file.iso").into_dir("/Freebox/ISO"))
        .await
        .unwrap();
    assert_eq!(id, 31);
    add.assert_async().await;
}

#[tokio::test]
async fn list_and_update_tasks() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let task = json!({
        "id": 31,
        "type": "http",
        "name": "file.iso",
        "status": "downloading",
        "size": 1000,
        "rx_bytes": 250,
        "rx_pct": 2500,
        "io_priority": "normal",
        "download_dir": "L0ZyZWVib3gvSVNP"
    });
    let _list = fixture
        .mock_json("GET", "downloads/", 200, ok_body(json!([task])))
        .await;
    let mut paused = task.clone();
    paused["status"] = json!("stopped");
    paused["io_priority"] = json!("high");
    let update = fixture
        .server
        .mock("PUT", api_path("downloads/31").as_str())
        .match_body(Matcher::Json(json!({ "io_priority": "high", "status": "stopped" })))
        .with_status(200)
        .with_body(ok_body(paused))
        .create_async()
        .await;

    let client = fixture.client();
    let tasks = client.list_download_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, DownloadStatus::Downloading);
    assert_eq!(tasks[0].download_dir.as_str(), "/Freebox/ISO");

    let updated = client
        .update_download_task(
            31,
            &DownloadTaskUpdate {
                io_priority: Some(IoPriority::High),
                status: Some(DownloadStatus::Stopped),
                queue_pos: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, DownloadStatus::Stopped);
    update.assert_async().await;
}

#[tokio::test]
async fn delete_and_erase_use_distinct_endpoints() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let done = json!({ "success": true }).to_string();
    let delete = fixture.mock_json("DELETE", "downloads/31", 200, done.clone()).await;
    let erase = fixture.mock_json("DELETE", "downloads/32/erase", 200, done).await;

    let client = fixture.client();
    client.delete_download_task(31).await.unwrap();
    client.erase_download_task(32).await.unwrap();
    delete.assert_async().await;
    erase.assert_async().await;
}
