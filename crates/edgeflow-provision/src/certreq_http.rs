//! HTTP certificate request provisioning
//!
//! Same protocol as the DNS family with a 10 minute budget and one
//! behavioral difference in the terminal-state rule: an empty log keeps the
//! request pending instead of failing it.

use crate::api::ProvisioningApi;
use crate::budget::PollConfig;
use crate::error::{ProvisionError, Result};
use crate::outcome::ProvisionOutcome;
use crate::poller;
use edgeflow_api::{HttpCertRequest, NewHttpCertRequest, parse_status_message};
use tokio_util::sync::CancellationToken;

/// Request a certificate through the HTTP challenge and poll until issuance
/// settles or the fixed budget runs out.
///
/// Requires the domains' DNS to already point at the CDN. Budget exhaustion
/// is not an error; see the DNS variant.
pub async fn request_http_certificate(
    api: &dyn ProvisioningApi,
    domains: &[String],
    standalone: bool,
    cancel: &CancellationToken,
) -> Result<HttpCertRequest> {
    let created = api
        .create_http_cert_request(&NewHttpCertRequest {
            domains: domains.to_vec(),
            standalone,
        })
        .await
        .map_err(ProvisionError::from)?;
    tracing::info!(id = created.id, "HTTP certificate request registered");

    let config = PollConfig::http_cert_request();
    let id = created.id;
    let outcome = poller::poll(&config, cancel, || probe(api, id)).await?;
    match outcome {
        ProvisionOutcome::Completed(snapshot) => Ok(snapshot),
        ProvisionOutcome::Failed { reason, .. } => Err(ProvisionError::ProvisioningFailed(reason)),
        ProvisionOutcome::Pending => Ok(created),
    }
}

async fn probe(api: &dyn ProvisioningApi, id: i64) -> Result<ProvisionOutcome<HttpCertRequest>> {
    let snapshot = api.http_cert_request(id).await?;
    let outcome = classify(&snapshot);
    if !outcome.is_terminal() {
        tracing::info!(id, "waiting for the HTTP certificate request to complete");
    }
    Ok(outcome)
}

/// Terminal-state rule for HTTP certificate requests: only a present,
/// non-empty log is terminal. See the DNS variant for the deliberate
/// asymmetry.
pub fn classify(snapshot: &HttpCertRequest) -> ProvisionOutcome<HttpCertRequest> {
    if snapshot.certificate.is_some() {
        return ProvisionOutcome::Completed(snapshot.clone());
    }
    match snapshot.log.as_deref() {
        Some(log) if !log.is_empty() => ProvisionOutcome::Failed {
            reason: parse_status_message(log),
            retryable: false,
        },
        _ => ProvisionOutcome::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCertReqApi;
    use std::time::Duration;
    use tokio::time::Instant;

    fn snapshot(certificate: Option<i64>, log: Option<&str>) -> HttpCertRequest {
        HttpCertRequest {
            id: 77,
            common_name: "a.com".to_string(),
            san: "b.com".to_string(),
            standalone: false,
            created_at: "2026-03-01T10:00:00Z".to_string(),
            updated_at: "2026-03-01T10:00:00Z".to_string(),
            certificate,
            log: log.map(str::to_owned),
        }
    }

    #[test]
    fn test_classify_completed() {
        assert!(classify(&snapshot(Some(12), None)).is_completed());
    }

    #[test]
    fn test_classify_empty_log_stays_pending() {
        // Identical payload shape fails the DNS classifier; here it must
        // keep polling.
        assert_eq!(classify(&snapshot(None, Some(""))), ProvisionOutcome::Pending);
    }

    #[test]
    fn test_classify_null_log_pending() {
        assert_eq!(classify(&snapshot(None, None)), ProvisionOutcome::Pending);
    }

    #[test]
    fn test_classify_non_empty_log_fails() {
        let outcome = classify(&snapshot(None, Some(r#"{"en": "challenge unreachable"}"#)));
        assert_eq!(
            outcome,
            ProvisionOutcome::Failed {
                reason: "challenge unreachable".to_string(),
                retryable: false
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_pending_until_budget_exhaustion_is_not_an_error() {
        let api = FakeCertReqApi::new();
        api.push_http(snapshot(None, None));
        let started = Instant::now();

        let result = request_http_certificate(
            &api,
            &["a.com".to_string(), "b.com".to_string()],
            false,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        // The create-time snapshot comes back untouched: no certificate, no
        // status message.
        assert_eq!(result.certificate, None);
        assert_eq!(result.log, None);
        assert_eq!(result.domain_list(), vec!["a.com", "b.com"]);
        // Bounded by the fixed 10 minute budget plus one interval.
        assert!(started.elapsed() <= Duration::from_secs(10 * 60 + 20));
        // ceil(600 / 20) + 1 probes at most.
        assert!(api.http_reads() <= 31);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_completes_when_certificate_appears() {
        let api = FakeCertReqApi::new();
        api.push_http(snapshot(None, None));
        api.push_http(snapshot(Some(12), None));

        let result = request_http_certificate(
            &api,
            &["a.com".to_string()],
            true,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(result.certificate, Some(12));
        assert_eq!(api.http_reads(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_failure_surfaces_backend_message() {
        let api = FakeCertReqApi::new();
        api.push_http(snapshot(
            None,
            Some(r#"{"en": "domain does not point to the CDN", "status": "error"}"#),
        ));

        let err = request_http_certificate(
            &api,
            &["a.com".to_string()],
            false,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            ProvisionError::ProvisioningFailed(reason) => {
                assert_eq!(reason, "error: domain does not point to the CDN");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
