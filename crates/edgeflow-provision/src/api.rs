//! Backend API seam for the provisioning operations

use async_trait::async_trait;
use edgeflow_api::{
    ApiClient, ApiError, DnsCertRequest, HttpCertRequest, NewDnsCertRequest, NewHttpCertRequest,
    Site,
};

/// The slice of the management API the provisioning operations depend on.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory fakes so multi-minute budgets can elapse on a paused clock.
#[async_trait]
pub trait ProvisioningApi: Send + Sync {
    async fn create_site(&self, domain: &str) -> Result<Site, ApiError>;

    async fn site_by_domain(&self, domain: &str) -> Result<Option<Site>, ApiError>;

    async fn create_dns_cert_request(
        &self,
        request: &NewDnsCertRequest,
    ) -> Result<DnsCertRequest, ApiError>;

    async fn dns_cert_request(&self, id: i64) -> Result<DnsCertRequest, ApiError>;

    async fn create_http_cert_request(
        &self,
        request: &NewHttpCertRequest,
    ) -> Result<HttpCertRequest, ApiError>;

    async fn http_cert_request(&self, id: i64) -> Result<HttpCertRequest, ApiError>;
}

#[async_trait]
impl ProvisioningApi for ApiClient {
    async fn create_site(&self, domain: &str) -> Result<Site, ApiError> {
        ApiClient::create_site(self, domain).await
    }

    async fn site_by_domain(&self, domain: &str) -> Result<Option<Site>, ApiError> {
        ApiClient::site_by_domain(self, domain).await
    }

    async fn create_dns_cert_request(
        &self,
        request: &NewDnsCertRequest,
    ) -> Result<DnsCertRequest, ApiError> {
        ApiClient::create_dns_cert_request(self, request).await
    }

    async fn dns_cert_request(&self, id: i64) -> Result<DnsCertRequest, ApiError> {
        ApiClient::dns_cert_request(self, id).await
    }

    async fn create_http_cert_request(
        &self,
        request: &NewHttpCertRequest,
    ) -> Result<HttpCertRequest, ApiError> {
        ApiClient::create_http_cert_request(self, request).await
    }

    async fn http_cert_request(&self, id: i64) -> Result<HttpCertRequest, ApiError> {
        ApiClient::http_cert_request(self, id).await
    }
}
