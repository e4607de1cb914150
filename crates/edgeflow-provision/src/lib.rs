//! Edgeflow provisioning completion protocol
//!
//! This crate converges synchronous create calls against backend-side
//! asynchrony. Three resource families need it:
//!
//! - **Sites**: domain-ownership verification runs synchronously inside the
//!   creation call, so the creation call itself is retried.
//! - **DNS certificate requests**: created once, then observed through
//!   read-only polling until the certificate id appears or the backend
//!   writes a log.
//! - **HTTP certificate requests**: same, with a different terminal rule
//!   for empty logs and a shorter budget.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                edgeflow CLI                       │
//! │        (site create / certreq dns / http)         │
//! └──────────────────┬───────────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────────┐
//! │            edgeflow-provision                     │
//! │  orchestrators ── poller ── budget ── outcome     │
//! │            trait ProvisioningApi                  │
//! └──────────────────┬───────────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────────┐
//! │              edgeflow-api                         │
//! │     authenticated management API client           │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Every operation owns an independent outcome and budget; nothing is
//! shared across operations and nothing survives the process. Budgets are
//! wall-clock bounded: an operation returns within `timeout + interval`.

pub mod api;
pub mod budget;
pub mod certreq_dns;
pub mod certreq_http;
pub mod error;
pub mod outcome;
pub mod poller;
pub mod site;

#[cfg(test)]
mod testing;

// Re-exports
pub use api::ProvisioningApi;
pub use budget::{
    CERT_REQUEST_INTERVAL, CERT_REQUEST_SLACK, DNS_CERT_REQUEST_TIMEOUT, DeadlineBudget,
    HTTP_CERT_REQUEST_TIMEOUT, PollConfig, SITE_CREATE_INTERVAL, SITE_CREATE_SLACK,
    SITE_CREATE_TIMEOUT,
};
pub use certreq_dns::request_dns_certificate;
pub use certreq_http::request_http_certificate;
pub use error::{ProvisionError, Result};
pub use outcome::ProvisionOutcome;
pub use site::create_site;
