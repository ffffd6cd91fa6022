//! Event subscription against a local websocket server.

mod common;

use common::*;
use freebox_client::types::{EventDescription, VirtualMachineStateChange, VirtualMachineStatus};
use freebox_client::{Client, Error};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

/// Accept one websocket connection and play `frames` after the register frame.
async fn serve_once(
    ack: serde_json::Value,
    frames: Vec<serde_json::Value>,
) -> (String, Arc<Mutex<Option<(String, String)>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let token = request
                .headers()
                .get("X-Fbx-App-Auth")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            *recorded.lock().unwrap() = Some((request.uri().path().to_string(), token));
            Ok(response)
        };
        let mut socket = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        if let Some(Ok(Message::Text(register))) = socket.next().await {
            let register: serde_json::Value = serde_json::from_str(&register).unwrap();
            assert_eq!(register["action"], "register");
        }
        socket.send(Message::Text(ack.to_string())).await.unwrap();
        for frame in frames {
            socket.send(Message::Text(frame.to_string())).await.unwrap();
        }
        socket.close(None).await.ok();
    });

    (addr.to_string(), seen)
}

fn client_for(endpoint: &str, transport: &Arc<ScriptedTransport>) -> Client {
    Client::builder(endpoint, VERSION)
        .app_id(APP_ID)
        .private_token(PRIVATE_TOKEN)
        .transport(transport.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn notifications_arrive_in_order() {
    let (endpoint, seen) = serve_once(
        json!({ "action": "register", "success": true }),
        vec![
            json!({
                "action": "notification",
                "success": true,
                "source": "vm",
                "event": "state_changed",
                "result": { "id": 0, "status": "starting" }
            }),
            json!({
                "action": "notification",
                "success": true,
                "source": "vm",
                "event": "state_changed",
                "result": { "id": 0, "status": "running" }
            }),
        ],
    )
    .await;
    let transport = ScriptedTransport::new();
    transport.login("ws-token");
    let client = client_for(&endpoint, &transport);

    let mut events = client
        .listen_events(&[EventDescription::vm_state_changed()])
        .await
        .unwrap();

    let first = events.recv().await.unwrap().unwrap();
    assert!(first.is(&EventDescription::vm_state_changed()));
    let change: VirtualMachineStateChange = first.decode().unwrap();
    assert_eq!(change.status, VirtualMachineStatus::Starting);

    let second = events.next().await.unwrap().unwrap();
    let change: VirtualMachineStateChange = second.decode().unwrap();
    assert_eq!(change.status, VirtualMachineStatus::Running);

    assert!(events.recv().await.is_none());

    let (path, token) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(path, "/api/v8/ws/event");
    assert_eq!(token, "ws-token");
}

#[tokio::test]
async fn rejected_registration_is_an_error() {
    let (endpoint, _seen) = serve_once(
        json!({
            "action": "register",
            "success": false,
            "error_code": "invalid_request",
            "msg": "unknown event"
        }),
        Vec::new(),
    )
    .await;
    let transport = ScriptedTransport::new();
    transport.login("ws-token");
    let client = client_for(&endpoint, &transport);

    let err = client
        .listen_events(&[EventDescription::new("vm", "nope")])
        .await
        .unwrap_err();
    match err {
        Error::Api(api) => assert_eq!(api.code, "invalid_request"),
        other => panic!("unexpected {other:?}"),
    }
}
