//! Shared in-memory fakes for the provisioning tests

use crate::api::ProvisioningApi;
use async_trait::async_trait;
use edgeflow_api::{
    ApiError, DnsCertRequest, HttpCertRequest, NewDnsCertRequest, NewHttpCertRequest, Site,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Certificate request backend fed with scripted read snapshots; the last
/// scripted snapshot repeats once the script is exhausted.
pub struct FakeCertReqApi {
    dns_snapshots: Mutex<Vec<DnsCertRequest>>,
    http_snapshots: Mutex<Vec<HttpCertRequest>>,
    dns_reads: AtomicUsize,
    http_reads: AtomicUsize,
}

impl FakeCertReqApi {
    pub fn new() -> Self {
        Self {
            dns_snapshots: Mutex::new(Vec::new()),
            http_snapshots: Mutex::new(Vec::new()),
            dns_reads: AtomicUsize::new(0),
            http_reads: AtomicUsize::new(0),
        }
    }

    pub fn push_dns(&self, snapshot: DnsCertRequest) {
        self.dns_snapshots.lock().unwrap().push(snapshot);
    }

    pub fn push_http(&self, snapshot: HttpCertRequest) {
        self.http_snapshots.lock().unwrap().push(snapshot);
    }

    pub fn dns_reads(&self) -> usize {
        self.dns_reads.load(Ordering::SeqCst)
    }

    pub fn http_reads(&self) -> usize {
        self.http_reads.load(Ordering::SeqCst)
    }

    fn next<T: Clone>(items: &Mutex<Vec<T>>, reads: &AtomicUsize) -> T {
        let items = items.lock().unwrap();
        let index = reads.fetch_add(1, Ordering::SeqCst);
        items
            .get(index)
            .or_else(|| items.last())
            .cloned()
            .expect("no snapshots scripted")
    }
}

#[async_trait]
impl ProvisioningApi for FakeCertReqApi {
    async fn create_site(&self, _domain: &str) -> Result<Site, ApiError> {
        unimplemented!("not used by certificate request tests")
    }

    async fn site_by_domain(&self, _domain: &str) -> Result<Option<Site>, ApiError> {
        unimplemented!("not used by certificate request tests")
    }

    async fn create_dns_cert_request(
        &self,
        request: &NewDnsCertRequest,
    ) -> Result<DnsCertRequest, ApiError> {
        Ok(DnsCertRequest {
            id: 15,
            credential: request.credential,
            domains: request.domains.clone(),
            created_at: "2026-03-01T10:00:00Z".to_string(),
            updated_at: "2026-03-01T10:00:00Z".to_string(),
            certificate: None,
            log: None,
        })
    }

    async fn dns_cert_request(&self, _id: i64) -> Result<DnsCertRequest, ApiError> {
        Ok(Self::next(&self.dns_snapshots, &self.dns_reads))
    }

    async fn create_http_cert_request(
        &self,
        request: &NewHttpCertRequest,
    ) -> Result<HttpCertRequest, ApiError> {
        let mut domains = request.domains.iter();
        Ok(HttpCertRequest {
            id: 77,
            common_name: domains.next().cloned().unwrap_or_default(),
            san: domains.cloned().collect::<Vec<_>>().join("\n"),
            standalone: request.standalone,
            created_at: "2026-03-01T10:00:00Z".to_string(),
            updated_at: "2026-03-01T10:00:00Z".to_string(),
            certificate: None,
            log: None,
        })
    }

    async fn http_cert_request(&self, _id: i64) -> Result<HttpCertRequest, ApiError> {
        Ok(Self::next(&self.http_snapshots, &self.http_reads))
    }
}
