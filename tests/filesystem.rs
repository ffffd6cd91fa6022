mod common;

use common::*;
use freebox_client::types::{FileSystemTaskState, FileSystemTaskType, FileType};
use freebox_client::Error;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn file_info_decodes_path() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .mock_json(
            "GET",
            "fs/info/L0ZyZWVib3gvaGVsbG8udHh0",
            200,
            ok_body(json!({
                "path": "L0ZyZWVib3gvaGVsbG8udHh0",
                "name": "hello.txt",
                "mimetype": "text/plain",
                "type": "file",
                "size": 11,
                "modification": 1652447394,
                "index": 0,
                "link": false,
                "hidden": false
            })),
        )
        .await;

    let info = fixture.client().get_file_info("/Freebox/hello.txt").await.unwrap();
    assert_eq!(info.path.as_str(), "/Freebox/hello.txt");
    assert_eq!(info.name, "hello.txt");
    assert_eq!(info.file_type, FileType::File);
    assert_eq!(info.size, 11);
}

#[tokio::test]
async fn missing_path_is_not_found() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .mock_json(
            "GET",
            "fs/info/L0ZyZWVib3gvbWlzc2luZw==",
            404,
            error_body("path_not_found", "Le chemin n'existe pas"),
        )
        .await;

    let err = fixture.client().get_file_info("/Freebox/missing").await.unwrap_err();
    match err {
        Error::NotFound(api) => assert_eq!(api.code, "path_not_found"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn create_directory_returns_decoded_path() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let mkdir = fixture
        .server
        .mock("POST", api_path("fs/mkdir/").as_str())
        .match_header("X-Fbx-App-Auth", SESSION_TOKEN)
        .match_body(Matcher::Json(json!({
            "parent": "L0ZyZWVib3gvRG93bmxvYWRz",
            "dirname": "new"
        })))
        .with_status(200)
        .with_body(ok_body(json!("L0ZyZWVib3gvRG93bmxvYWRzL25ldw==")))
        .create_async()
        .await;

    let created = fixture
        .client()
        .create_directory("/Freebox/Downloads", "new")
        .await
        .unwrap();
    assert_eq!(created, "/Freebox/Downloads/new");
    mkdir.assert_async().await;
}

#[tokio::test]
async fn create_existing_directory_is_a_conflict() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .mock_json(
            "POST",
            "fs/mkdir/",
            409,
            error_body("destination_conflict", "La destination existe déjà"),
        )
        .await;

    let err = fixture
        .client()
        .create_directory("/Freebox/Downloads", "new")
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
}

#[tokio::test]
async fn remove_files_sends_encoded_paths() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let rm = fixture
        .server
        .mock("POST", api_path("fs/rm/").as_str())
        .match_header("X-Fbx-App-Auth", SESSION_TOKEN)
        .match_body(Matcher::Json(json!({
            "files": ["L0ZyZWVib3gvaGVsbG8udHh0", "L0ZyZWVib3gvRG93bmxvYWRz"]
        })))
        .with_status(200)
        .with_body(ok_body(json!({
            "id": 5,
            "type": "rm",
            "state": "running",
            "nfiles": 2
        })))
        .create_async()
        .await;

    let task = fixture
        .client()
        .remove_files(&["/Freebox/hello.txt", "/Freebox/Downloads"])
        .await
        .unwrap();
    assert_eq!(task.id, 5);
    assert_eq!(task.kind, FileSystemTaskType::Rm);
    assert_eq!(task.state, FileSystemTaskState::Running);
    rm.assert_async().await;
}

#[tokio::test]
async fn unknown_task_is_not_found() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .mock_json("DELETE", "fs/tasks/8", 404, error_body("task_not_found", "Tâche introuvable"))
        .await;

    let err = fixture.client().delete_file_system_task(8).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn download_streams_body_with_metadata() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .server
        .mock("GET", api_path("dl/L0ZyZWVib3gvaGVsbG8udHh0").as_str())
        .match_header("X-Fbx-App-Auth", SESSION_TOKEN)
        .with_status(200)
        .with_header("content-type", "text/plain; charset=utf-8")
        .with_header("content-disposition", r#"attachment; filename="hello.txt""#)
        .with_body("hello world")
        .create_async()
        .await;

    let file = fixture.client().get_file("/Freebox/hello.txt").await.unwrap();
    assert_eq!(file.content_type, "text/plain");
    assert_eq!(file.file_name, "hello.txt");
    let body = file.content.bytes().await.unwrap();
    assert_eq!(&body[..], b"hello world");
}

#[tokio::test]
async fn download_error_keeps_business_code() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login().await;
    let _m = fixture
        .mock_json(
            "GET",
            "dl/L0ZyZWVib3gvbWlzc2luZw==",
            404,
            error_body("not_found", "Fichier introuvable"),
        )
        .await;

    let err = fixture.client().get_file("/Freebox/missing").await.unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
}

#[tokio::test]
async fn download_renews_an_expired_session() {
    let transport = ScriptedTransport::new();
    transport
        .login("t1")
        .respond(403, error_body("auth_required", "expired"))
        .login("t2")
        .respond(200, "content");
    let file = transport.client().get_file("/Freebox/hello.txt").await.unwrap();
    assert_eq!(&file.content.bytes().await.unwrap()[..], b"content");

    let requests = transport.requests();
    assert_eq!(requests.len(), 6);
    assert!(requests[5].url.ends_with("/api/v8/dl/L0ZyZWVib3gvaGVsbG8udHh0"));
    assert_eq!(requests[5].header("X-Fbx-App-Auth"), Some("t2"));
}
