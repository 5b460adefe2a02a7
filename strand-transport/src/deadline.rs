//! Bounded I/O waits.
//!
//! Every suspension point in a session (connect, decode wait, write wait)
//! runs inside [`bound`], which races the operation against its deadline
//! and the session's cancellation token. Expiry or cancellation drops the
//! pending I/O future; the caller then tears the session down, so a
//! bounded operation can end pending-forever in no circumstance.
//!
//! The token arm is what lets a concurrent `disconnect` claim the session
//! and immediately unblock an in-flight receive sitting on an idle socket,
//! instead of waiting out the caller's deadline.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Why a bounded operation did not produce its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineError {
    /// The deadline expired before the operation completed.
    Elapsed,
    /// The session's cancellation token fired.
    Cancelled,
}

/// Run `future` for at most `limit`, aborting early if `cancel` fires.
pub async fn bound<F>(
    limit: Duration,
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, DeadlineError>
where
    F: Future,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(DeadlineError::Cancelled),
        result = tokio::time::timeout(limit, future) => {
            result.map_err(|_| DeadlineError::Elapsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let cancel = CancellationToken::new();
        let result = bound(Duration::from_secs(1), &cancel, async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_elapses() {
        let cancel = CancellationToken::new();
        let result = bound(
            Duration::from_millis(20),
            &cancel,
            std::future::pending::<()>(),
        )
        .await;
        assert_eq!(result, Err(DeadlineError::Elapsed));
    }

    #[tokio::test]
    async fn test_cancellation_preempts() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = bound(
            Duration::from_secs(30),
            &cancel,
            std::future::pending::<()>(),
        )
        .await;
        assert_eq!(result, Err(DeadlineError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancellation_fires_mid_wait() {
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            child.cancel();
        });

        let result = bound(
            Duration::from_secs(30),
            &cancel,
            std::future::pending::<()>(),
        )
        .await;
        assert_eq!(result, Err(DeadlineError::Cancelled));
    }
}
