//! # freebox-client
//!
//! 这是 Freebox OS 管理接口的类型化异步客户端，提供会话认证与各类资源的增删改查。
//!
//! Typed async client for the Freebox OS HTTP management API.
//!
//! ## Overview
//!
//! The router exposes a JSON API behind a session token obtained through a
//! challenge/response handshake. This crate wraps that handshake, the common
//! response envelope and the error taxonomy, and builds thin typed facades for
//! each resource family on top.
//!
//! - **Session handling**: the first authenticated call logs in; a rejected
//!   session is renewed once and the call retried once
//! - **Typed errors**: not-found, conflict and authentication failures are
//!   distinct [`Error`] variants
//! - **Injectable transport**: [`transport::HttpTransport`] lets tests run
//!   without a network
//! - **Streaming bodies**: downloads and uploads never buffer whole files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use freebox_client::{Client, DEFAULT_API_VERSION};
//!
//! #[tokio::main]
//! async fn main() -> freebox_client::Result<()> {
//!     let client = Client::builder("mafreebox.freebox.fr", DEFAULT_API_VERSION)
//!         .app_id("fr.example.app")
//!         .private_token("private-token")
//!         .build()?;
//!
//!     let permissions = client.login().await?;
//!     if permissions.settings {
//!         for rule in client.list_port_forwarding_rules().await? {
//!             println!("{} -> {:?}", rule.id, rule.payload.lan_ip);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, dispatcher and login handshake |
//! | [`session`] | Session, permissions, token and password derivation |
//! | [`envelope`] | Response envelope decoding |
//! | [`error`] / [`error_code`] | Error taxonomy and code classification |
//! | [`transport`] | HTTP transport abstraction |
//! | [`types`] | Resource data types and field codecs |
//! | [`events`] | Websocket event subscription |
//! | [`cancel`] | Cancellation and deadlines |

pub mod cancel;
pub mod client;
pub mod envelope;
pub mod error_code;
pub mod events;
mod resources;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{ApiRequest, Client, ClientBuilder, ClientConfig, DEFAULT_API_VERSION};
pub use events::EventStream;
pub use resources::FileUpload;
pub use session::{Permissions, PrivateToken, Session};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error};
