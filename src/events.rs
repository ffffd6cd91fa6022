//! 事件流：通过 WebSocket 订阅路由器通知。
//!
//! Event subscription over the `ws/event` websocket.
//!
//! After registration a background task reads notifications and forwards
//! them, in arrival order, into a bounded queue read through [`EventStream`].

use crate::client::Client;
use crate::error::{ApiError, Error};
use crate::error_code;
use crate::session::SESSION_HEADER;
use crate::types::events::{IncomingFrame, RegisterFrame};
use crate::types::{Event, EventDescription};
use crate::Result;
use futures::Stream;
use futures_util::{SinkExt, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::debug;

const EVENT_QUEUE_CAPACITY: usize = 64;

/// Subscribed notifications. Dropping the stream closes the socket.
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::Receiver<Result<Event>>,
    task: JoinHandle<()>,
}

impl EventStream {
    /// Next event, or `None` once the socket is closed.
    pub async fn recv(&mut self) -> Option<Result<Event>> {
        self.receiver.recv().await
    }

    /// Stop reading and close the socket.
    pub fn close(&mut self) {
        self.task.abort();
        self.receiver.close();
    }
}

impl Stream for EventStream {
    type Item = Result<Event>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Client {
    /// Subscribe to `events`.
    ///
    /// Returns once the router acknowledged the registration.
    pub async fn listen_events(&self, events: &[EventDescription]) -> Result<EventStream> {
        let session = self.ensure_session().await?;

        let mut url = self.api_url("ws/event")?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| Error::configuration(format!("cannot use {scheme} for '{url}'")))?;

        let mut request = url.as_str().into_client_request()?;
        let name = HeaderName::from_bytes(SESSION_HEADER.as_bytes())
            .map_err(|e| Error::configuration(format!("invalid header name: {e}")))?;
        let token = HeaderValue::from_str(session.token())
            .map_err(|e| Error::configuration(format!("invalid session token: {e}")))?;
        request.headers_mut().insert(name, token);

        let (mut socket, _) = tokio_tungstenite::connect_async(request).await?;

        let register = RegisterFrame {
            action: "register",
            events: events.iter().map(ToString::to_string).collect(),
        };
        let frame = serde_json::to_string(&register)
            .map_err(|e| Error::Serialization(format!("failed to encode register frame: {e}")))?;
        socket.send(Message::Text(frame)).await?;

        // wait for the registration ack
        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => {
                    let ack = parse_frame(&text)?;
                    if ack.action != "register" {
                        continue;
                    }
                    if !ack.success {
                        return Err(frame_error(ack));
                    }
                    break;
                }
                Some(Ok(Message::Close(_))) | None => {
                    return Err(tungstenite::Error::ConnectionClosed.into());
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
        debug!(count = events.len(), "registered for events");

        let (sender, receiver) = mpsc::channel::<Result<Event>>(EVENT_QUEUE_CAPACITY);
        let task = tokio::spawn(async move {
            while let Some(message) = socket.next().await {
                let item = match message {
                    Ok(Message::Text(text)) => match parse_frame(&text) {
                        Ok(frame) if frame.action != "notification" => continue,
                        Ok(frame) if frame.success => Ok(Event {
                            source: frame.source,
                            name: frame.event,
                            result: frame.result,
                        }),
                        Ok(frame) => Err(frame_error(frame)),
                        Err(e) => Err(e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        let _ = sender.send(Err(e.into())).await;
                        break;
                    }
                };
                if sender.send(item).await.is_err() {
                    break;
                }
            }
            debug!("event socket closed");
        });

        Ok(EventStream { receiver, task })
    }
}

fn parse_frame(text: &str) -> Result<IncomingFrame> {
    serde_json::from_str(text)
        .map_err(|e| Error::decoding(format!("failed to unmarshal event frame '{text}'"), e))
}

fn frame_error(frame: IncomingFrame) -> Error {
    error_code::classify(ApiError {
        code: frame.error_code.unwrap_or_default(),
        message: frame.msg.unwrap_or_default(),
        uid: None,
    })
}
