use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::Error;
use crate::Result;

/// Runs the future built by `task` unless `cancel` fires first.
///
/// The future is only built when the token is still live, so a cancelled
/// start never reaches the runtime. A cancellation mid-flight drops the
/// future; whatever it already created is left behind.
pub(crate) async fn run_cancellable<F, Fut, T>(
    cancel: &CancellationToken,
    stage: &'static str,
    task: F,
) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        warn!(stage, "cancelled before start");
        return Err(Error::Cancelled { stage });
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(stage, "cancelled while in flight");
            Err(Error::Cancelled { stage })
        }
        r = task() => r,
    }
}
