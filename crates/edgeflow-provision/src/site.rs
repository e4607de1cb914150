//! Site provisioning
//!
//! Domain-ownership verification runs synchronously inside the creation
//! call, so there is nothing to read back after a failed attempt: the
//! creation call itself is the probe and is re-issued every interval until
//! it succeeds, fails fatally or the budget runs out. Unlike the
//! certificate families, budget exhaustion here is fatal.

use crate::api::ProvisioningApi;
use crate::budget::PollConfig;
use crate::error::{ProvisionError, Result};
use crate::outcome::ProvisionOutcome;
use crate::poller;
use edgeflow_api::{ApiError, Site};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Create a site and block until verification converges.
///
/// `timeout` falls back to the default site-creation budget; it is the one
/// caller-configurable budget in the provisioning layer.
pub async fn create_site(
    api: &dyn ProvisioningApi,
    domain: &str,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<Site> {
    let config = PollConfig::site_create(timeout);
    tracing::info!(domain, "creating site");

    let outcome = poller::poll(&config, cancel, || attempt_create(api, domain)).await?;
    match outcome {
        ProvisionOutcome::Completed(site) => Ok(site),
        ProvisionOutcome::Failed {
            reason,
            retryable: true,
        } => Err(ProvisionError::VerificationTimeout {
            domain: domain.to_string(),
            reason,
        }),
        ProvisionOutcome::Failed {
            reason,
            retryable: false,
        } => Err(ProvisionError::Validation(reason)),
        ProvisionOutcome::Pending => Err(ProvisionError::Validation(format!(
            "site creation for '{domain}' returned no snapshot"
        ))),
    }
}

/// One creation attempt, classified.
async fn attempt_create(
    api: &dyn ProvisioningApi,
    domain: &str,
) -> Result<ProvisionOutcome<Site>> {
    match api.create_site(domain).await {
        Ok(site) => Ok(ProvisionOutcome::Completed(site)),
        Err(ApiError::SiteVerification { message }) => {
            tracing::info!(domain, "site verification pending, retrying");
            Ok(ProvisionOutcome::Failed {
                reason: message,
                retryable: true,
            })
        }
        Err(ApiError::SiteExists { message }) => resolve_existing(api, domain, message).await,
        Err(err) if err.is_transport() => Err(ProvisionError::Transport(err)),
        Err(err) => Ok(ProvisionOutcome::Failed {
            reason: err.to_string(),
            retryable: false,
        }),
    }
}

/// Idempotence fallback: converge concurrent or repeated creations for the
/// same domain on the record the backend already holds.
async fn resolve_existing(
    api: &dyn ProvisioningApi,
    domain: &str,
    message: String,
) -> Result<ProvisionOutcome<Site>> {
    match api.site_by_domain(domain).await {
        Ok(Some(site)) => {
            tracing::info!(domain, id = site.id, "domain already provisioned, using the existing site");
            Ok(ProvisionOutcome::Completed(site))
        }
        Ok(None) => Ok(ProvisionOutcome::Failed {
            reason: message,
            retryable: false,
        }),
        Err(err) => {
            tracing::warn!(domain, error = %err, "lookup of the existing site failed");
            Ok(ProvisionOutcome::Failed {
                reason: message,
                retryable: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edgeflow_api::{DnsCertRequest, HttpCertRequest, NewDnsCertRequest, NewHttpCertRequest};
    use std::result::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn site(id: i64, domain: &str) -> Site {
        Site {
            id,
            company: 300,
            url: domain.to_string(),
            active: true,
            ssl: false,
        }
    }

    /// Scripted site backend: one canned result per creation attempt, the
    /// last one repeating.
    struct ScriptedApi {
        attempts: AtomicUsize,
        script: Vec<ScriptStep>,
        existing: Option<Site>,
    }

    enum ScriptStep {
        Verification,
        Exists,
        NotOwned,
        Success(Site),
    }

    impl ScriptedApi {
        fn new(script: Vec<ScriptStep>) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                script,
                existing: None,
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProvisioningApi for ScriptedApi {
        async fn create_site(&self, _domain: &str) -> Result<Site, ApiError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            let step = self.script.get(attempt).unwrap_or_else(|| {
                self.script.last().expect("script must not be empty")
            });
            match step {
                ScriptStep::Verification => Err(ApiError::SiteVerification {
                    message: "verification pending".to_string(),
                }),
                ScriptStep::Exists => Err(ApiError::SiteExists {
                    message: "the site already exists".to_string(),
                }),
                ScriptStep::NotOwned => {
                    Err(ApiError::SiteNotOwned("Site ownership denied".to_string()))
                }
                ScriptStep::Success(site) => Ok(site.clone()),
            }
        }

        async fn site_by_domain(&self, domain: &str) -> Result<Option<Site>, ApiError> {
            Ok(self
                .existing
                .clone()
                .filter(|site| site.url == domain))
        }

        async fn create_dns_cert_request(
            &self,
            _request: &NewDnsCertRequest,
        ) -> Result<DnsCertRequest, ApiError> {
            unimplemented!("not used by site tests")
        }

        async fn dns_cert_request(&self, _id: i64) -> Result<DnsCertRequest, ApiError> {
            unimplemented!("not used by site tests")
        }

        async fn create_http_cert_request(
            &self,
            _request: &NewHttpCertRequest,
        ) -> Result<HttpCertRequest, ApiError> {
            unimplemented!("not used by site tests")
        }

        async fn http_cert_request(&self, _id: i64) -> Result<HttpCertRequest, ApiError> {
            unimplemented!("not used by site tests")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_succeeds_after_one_verification_retry() {
        let api = ScriptedApi::new(vec![
            ScriptStep::Verification,
            ScriptStep::Success(site(42, "example.com")),
        ]);
        let started = Instant::now();

        let created = create_site(&api, "example.com", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.url, "example.com");
        assert!(created.active);
        assert_eq!(api.attempts(), 2);
        // One interval between the two attempts.
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_first_attempt_success_is_immediate() {
        let api = ScriptedApi::new(vec![ScriptStep::Success(site(7, "a.com"))]);
        let started = Instant::now();

        create_site(&api, "a.com", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(api.attempts(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_domain_converges_on_existing_site() {
        let mut api = ScriptedApi::new(vec![ScriptStep::Exists]);
        api.existing = Some(site(42, "example.com"));

        let created = create_site(&api, "example.com", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(api.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_domain_without_match_fails() {
        let api = ScriptedApi::new(vec![ScriptStep::Exists]);

        let err = create_site(&api, "example.com", None, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_aborts_without_retry() {
        let api = ScriptedApi::new(vec![ScriptStep::NotOwned]);

        let err = create_site(&api, "example.com", None, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Validation(_)));
        assert_eq!(api.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_budget_is_fatal_while_retryable() {
        let api = ScriptedApi::new(vec![ScriptStep::Verification]);

        let err = create_site(
            &api,
            "example.com",
            Some(Duration::from_secs(60)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            ProvisionError::VerificationTimeout { domain, .. } => {
                assert_eq!(domain, "example.com");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // 60s budget at 30s interval + 5s slack: attempts at t=0, 30, 60.
        assert_eq!(api.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_supersedes_budget() {
        let api = ScriptedApi::new(vec![ScriptStep::Verification]);
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            canceller.cancel();
        });

        let err = create_site(&api, "example.com", None, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Cancelled));
        assert_eq!(api.attempts(), 1);
    }
}
