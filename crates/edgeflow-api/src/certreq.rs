//! Certificate request endpoints (DNS and HTTP challenges)
//!
//! Certificate issuance happens out of band: the create call registers the
//! request and returns immediately with `certificate` and `log` unset. The
//! provisioning layer polls the read endpoints until the backend settles.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    DnsCertRequest, DnsProvider, HttpCertRequest, NewDnsCertRequest, NewHttpCertRequest,
    UpdateDnsCertRequest,
};

impl ApiClient {
    fn dns_cert_requests_path(&self) -> String {
        format!("/v1/autoprovisioning/{}/certreq_dns/", self.company_id())
    }

    fn http_cert_requests_path(&self) -> String {
        format!("/v1/autoprovisioning/{}/certreq_http/", self.company_id())
    }

    pub async fn dns_cert_requests(&self) -> Result<Vec<DnsCertRequest>> {
        self.get_json(
            &self.dns_cert_requests_path(),
            "couldn't retrieve the list of DNS certificate requests",
        )
        .await
    }

    pub async fn dns_cert_request(&self, id: i64) -> Result<DnsCertRequest> {
        self.get_json(
            &format!("{}{}/", self.dns_cert_requests_path(), id),
            &format!("couldn't retrieve the DNS certificate request with id {id}"),
        )
        .await
    }

    pub async fn create_dns_cert_request(
        &self,
        request: &NewDnsCertRequest,
    ) -> Result<DnsCertRequest> {
        self.post_json(
            &self.dns_cert_requests_path(),
            request,
            "couldn't create the DNS certificate request",
        )
        .await
    }

    /// Update the credential of a DNS certificate request. Changing the
    /// domain set requires a new request. The response body carries no
    /// useful model; callers re-read the request for a fresh snapshot.
    pub async fn update_dns_cert_request(&self, id: i64, credential: i64) -> Result<()> {
        let payload = UpdateDnsCertRequest { credential };
        let path = format!("{}{}/", self.dns_cert_requests_path(), id);
        let (status, body) = self
            .execute(self.request(reqwest::Method::PUT, &path).json(&payload))
            .await?;
        if status != 200 && status != 201 {
            return Err(crate::client::status_error(
                status,
                &format!("couldn't update the DNS certificate request with id {id}"),
                &body,
            ));
        }
        Ok(())
    }

    pub async fn delete_dns_cert_request(&self, id: i64) -> Result<()> {
        self.delete(
            &format!("{}{}/", self.dns_cert_requests_path(), id),
            &format!("API request failed trying to delete the DNS certificate request with id {id}"),
        )
        .await
    }

    pub async fn http_cert_request(&self, id: i64) -> Result<HttpCertRequest> {
        self.get_json(
            &format!("{}{}/", self.http_cert_requests_path(), id),
            &format!("couldn't retrieve the HTTP certificate request with id {id}"),
        )
        .await
    }

    /// HTTP certificate requests cannot be deleted; there is intentionally
    /// no delete call for them.
    pub async fn create_http_cert_request(
        &self,
        request: &NewHttpCertRequest,
    ) -> Result<HttpCertRequest> {
        self.post_json(
            &self.http_cert_requests_path(),
            request,
            "couldn't create the HTTP certificate request",
        )
        .await
    }

    /// DNS providers supported by the certificate-issuance hooks.
    pub async fn dns_providers(&self) -> Result<Vec<DnsProvider>> {
        self.get_json("/v1/autoprovisioning/dnshook/", "failure retrieving DNS providers")
            .await
    }
}

/// Render a certificate-request log for humans.
///
/// The backend stores the log as a JSON object with localized text and an
/// overall status; anything that does not match is returned verbatim.
pub fn parse_status_message(input: &str) -> String {
    if let Ok(log) = serde_json::from_str::<serde_json::Value>(input) {
        if let Some(en) = log.get("en").and_then(serde_json::Value::as_str) {
            return match log.get("status").and_then(serde_json::Value::as_str) {
                Some(status) => format!("{status}: {en}"),
                None => en.to_string(),
            };
        }
    }
    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_message_with_status() {
        let input = r#"{"en": "certificate issued", "status": "ok"}"#;
        assert_eq!(parse_status_message(input), "ok: certificate issued");
    }

    #[test]
    fn test_parse_status_message_without_status() {
        let input = r#"{"en": "validation failed"}"#;
        assert_eq!(parse_status_message(input), "validation failed");
    }

    #[test]
    fn test_parse_status_message_verbatim() {
        assert_eq!(parse_status_message("plain text error"), "plain text error");
        assert_eq!(parse_status_message(""), "");
    }
}
