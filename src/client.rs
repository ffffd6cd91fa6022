//! Client for the router management API.
//!
//! The public surface is [`Client`] and its [`ClientBuilder`]. Implementation
//! is split into submodules under `src/client/`: request dispatch, the login
//! handshake, and the builder. Resource facades extend `Client` from
//! `src/resources/`.

pub mod builder;
pub mod core;
mod auth;
pub(crate) mod dispatch;

pub use builder::ClientBuilder;
pub use core::{Client, ClientConfig};
pub use dispatch::{ApiRequest, Payload};

/// API version segment used when the caller does not query `api_version`.
pub const DEFAULT_API_VERSION: &str = "v8";
