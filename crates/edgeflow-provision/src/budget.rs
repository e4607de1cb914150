//! Poll configuration and deadline budgets
//!
//! Each resource family polls with fixed cadence constants; only the site
//! creation timeout is caller-configurable. The slack added to every budget
//! decrement guarantees termination despite imprecise sleeps, at the cost of
//! slightly fewer iterations than a naive `timeout / interval`.

use std::time::Duration;

/// Default budget for a site creation, overridable per call.
pub const SITE_CREATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Delay between site creation attempts.
pub const SITE_CREATE_INTERVAL: Duration = Duration::from_secs(30);
/// Extra budget consumed per site creation attempt.
pub const SITE_CREATE_SLACK: Duration = Duration::from_secs(5);

/// Fixed budget for DNS certificate requests.
pub const DNS_CERT_REQUEST_TIMEOUT: Duration = Duration::from_secs(12 * 60);
/// Fixed budget for HTTP certificate requests.
pub const HTTP_CERT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10 * 60);
/// Delay between certificate request probes.
pub const CERT_REQUEST_INTERVAL: Duration = Duration::from_secs(20);
/// Extra budget consumed per certificate request probe.
pub const CERT_REQUEST_SLACK: Duration = Duration::from_secs(1);

/// Cadence of one bounded polling operation.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Total wall-clock budget.
    pub timeout: Duration,
    /// Sleep between probes. Must be positive.
    pub interval: Duration,
    /// Added to the budget decrement on every iteration.
    pub slack: Duration,
    /// Optional fixed delay before the first probe.
    pub settle: Option<Duration>,
}

impl PollConfig {
    pub fn new(timeout: Duration, interval: Duration, slack: Duration) -> Self {
        assert!(!interval.is_zero(), "poll interval must be positive");
        Self {
            timeout,
            interval,
            slack,
            settle: None,
        }
    }

    /// Cadence for site creation; `timeout` falls back to
    /// [`SITE_CREATE_TIMEOUT`] when not supplied by the caller.
    pub fn site_create(timeout: Option<Duration>) -> Self {
        Self::new(
            timeout.unwrap_or(SITE_CREATE_TIMEOUT),
            SITE_CREATE_INTERVAL,
            SITE_CREATE_SLACK,
        )
    }

    pub fn dns_cert_request() -> Self {
        Self::new(
            DNS_CERT_REQUEST_TIMEOUT,
            CERT_REQUEST_INTERVAL,
            CERT_REQUEST_SLACK,
        )
    }

    pub fn http_cert_request() -> Self {
        Self::new(
            HTTP_CERT_REQUEST_TIMEOUT,
            CERT_REQUEST_INTERVAL,
            CERT_REQUEST_SLACK,
        )
    }
}

/// Remaining wall-clock budget of one bounded operation.
///
/// The budget only tracks planned sleep time; probe latency is covered by
/// the per-iteration slack.
#[derive(Debug, Clone)]
pub struct DeadlineBudget {
    remaining: Duration,
}

impl DeadlineBudget {
    pub fn new(timeout: Duration) -> Self {
        Self { remaining: timeout }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Consume one iteration's worth of budget, saturating at zero.
    pub fn consume(&mut self, cost: Duration) {
        self.remaining = self.remaining.saturating_sub(cost);
    }
}
