//! DNS certificate request provisioning
//!
//! The create call registers the request and returns immediately; issuance
//! happens out of band and is observed through read-only polling.

use crate::api::ProvisioningApi;
use crate::budget::PollConfig;
use crate::error::{ProvisionError, Result};
use crate::outcome::ProvisionOutcome;
use crate::poller;
use edgeflow_api::{DnsCertRequest, NewDnsCertRequest, parse_status_message};
use tokio_util::sync::CancellationToken;

/// Certificate authority requested for new certificates (Let's Encrypt).
pub const DEFAULT_CERTIFICATE_AUTHORITY: i64 = 1;

/// Request a certificate through the DNS challenge and poll until issuance
/// settles or the fixed budget runs out.
///
/// Budget exhaustion is not an error: the create-time snapshot (certificate
/// id unset) is returned so the caller can observe progress on a later
/// read.
pub async fn request_dns_certificate(
    api: &dyn ProvisioningApi,
    domains: &[String],
    credential: i64,
    cancel: &CancellationToken,
) -> Result<DnsCertRequest> {
    let created = api
        .create_dns_cert_request(&NewDnsCertRequest {
            domains: domains.join("\n"),
            credential,
            certificate_authority: DEFAULT_CERTIFICATE_AUTHORITY,
        })
        .await
        .map_err(ProvisionError::from)?;
    tracing::info!(id = created.id, "DNS certificate request registered");

    let config = PollConfig::dns_cert_request();
    let id = created.id;
    let outcome = poller::poll(&config, cancel, || probe(api, id)).await?;
    match outcome {
        ProvisionOutcome::Completed(snapshot) => Ok(snapshot),
        ProvisionOutcome::Failed { reason, .. } => Err(ProvisionError::ProvisioningFailed(reason)),
        ProvisionOutcome::Pending => Ok(created),
    }
}

async fn probe(api: &dyn ProvisioningApi, id: i64) -> Result<ProvisionOutcome<DnsCertRequest>> {
    let snapshot = api.dns_cert_request(id).await?;
    let outcome = classify(&snapshot);
    if !outcome.is_terminal() {
        tracing::info!(id, "waiting for the DNS certificate request to complete");
    }
    Ok(outcome)
}

/// Terminal-state rule for DNS certificate requests.
///
/// A present log is terminal even when it is empty. The HTTP challenge
/// rule differs: it only fails on a non-empty log. Both rules follow the
/// backend contract and must not be unified.
pub fn classify(snapshot: &DnsCertRequest) -> ProvisionOutcome<DnsCertRequest> {
    if snapshot.certificate.is_some() {
        return ProvisionOutcome::Completed(snapshot.clone());
    }
    match &snapshot.log {
        Some(log) => ProvisionOutcome::Failed {
            reason: parse_status_message(log),
            retryable: false,
        },
        None => ProvisionOutcome::Pending,
    }
}
