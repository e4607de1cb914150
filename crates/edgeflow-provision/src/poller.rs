//! Completion poller
//!
//! Generic bounded loop shared by every resource family: probe, classify,
//! stop on a terminal outcome, budget exhaustion or cancellation.

use crate::budget::{DeadlineBudget, PollConfig};
use crate::error::{ProvisionError, Result};
use crate::outcome::ProvisionOutcome;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Poll `probe` until it reports a terminal outcome or the budget runs out.
///
/// The budget decrements by `interval + slack` per iteration, so at most
/// `ceil(timeout / interval) + 1` probes run and the call returns within
/// `timeout + interval` of wall clock. On budget exhaustion the last
/// observed outcome is returned as-is; deciding whether a lingering
/// `Pending` is an error belongs to the caller.
///
/// Cancellation supersedes the budget: it is checked before, during and
/// after every sleep and ends the loop with [`ProvisionError::Cancelled`].
pub async fn poll<T, F, Fut>(
    config: &PollConfig,
    cancel: &CancellationToken,
    mut probe: F,
) -> Result<ProvisionOutcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ProvisionOutcome<T>>>,
{
    if let Some(settle) = config.settle {
        sleep_or_cancel(settle, cancel).await?;
    }

    let mut budget = DeadlineBudget::new(config.timeout);
    loop {
        let outcome = probe().await?;
        if outcome.is_terminal() {
            return Ok(outcome);
        }
        if budget.is_exhausted() {
            return Ok(outcome);
        }

        if cancel.is_cancelled() {
            return Err(ProvisionError::Cancelled);
        }
        sleep_or_cancel(config.interval, cancel).await?;
        if cancel.is_cancelled() {
            return Err(ProvisionError::Cancelled);
        }

        budget.consume(config.interval + config.slack);
    }
}

async fn sleep_or_cancel(duration: std::time::Duration, cancel: &CancellationToken) -> Result<()> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ProvisionError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
