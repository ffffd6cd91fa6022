//! Caller-driven cancellation.
//!
//! Dropping a client future already cancels the in-flight transport call.
//! These helpers turn a token or a deadline into [`Error::Cancelled`].

use crate::error::Error;
use crate::Result;
use std::future::Future;
use std::time::Duration;

pub use tokio_util::sync::CancellationToken;

/// Run `fut` until it completes or `token` is cancelled.
pub async fn with_cancel<T, F>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::Cancelled),
        out = fut => out,
    }
}

/// Run `fut` with a deadline.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(out) => out,
        Err(_) => Err(Error::Cancelled),
    }
}
