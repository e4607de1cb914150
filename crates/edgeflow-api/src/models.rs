//! Wire models for the management API

use serde::{Deserialize, Serialize};

/// OAuth2 token response from the access-token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// A company site (domain) served by the CDN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub company: i64,
    pub url: String,
    pub active: bool,
    pub ssl: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSite {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SiteVerifyRequest {
    pub domain: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SiteVerifyResponse {
    pub txt: String,
}

/// DNS-challenge certificate request.
///
/// `certificate` and `log` are `None` while the request is still being
/// processed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCertRequest {
    pub id: i64,
    pub credential: i64,
    /// Newline-separated domain list as stored by the backend.
    pub domains: String,
    pub created_at: String,
    pub updated_at: String,
    pub certificate: Option<i64>,
    pub log: Option<String>,
}

impl DnsCertRequest {
    /// Covered domains, deduplicated and sorted.
    pub fn domain_list(&self) -> Vec<String> {
        split_domains(&self.domains)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDnsCertRequest {
    /// Newline-separated domain list.
    pub domains: String,
    pub credential: i64,
    pub certificate_authority: i64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateDnsCertRequest {
    pub credential: i64,
}

/// HTTP-challenge certificate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCertRequest {
    pub id: i64,
    #[serde(rename = "cn")]
    pub common_name: String,
    pub san: String,
    pub standalone: bool,
    pub created_at: String,
    #[serde(rename = "last_modified_at")]
    pub updated_at: String,
    pub certificate: Option<i64>,
    #[serde(rename = "error_text")]
    pub log: Option<String>,
}

impl HttpCertRequest {
    /// Covered domains (common name plus SANs), deduplicated and sorted.
    pub fn domain_list(&self) -> Vec<String> {
        split_domains(&format!("{}\n{}", self.common_name, self.san))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHttpCertRequest {
    pub domains: Vec<String>,
    pub standalone: bool,
}

/// Origin server configuration. Not to be confused with the management API
/// itself; a backend here is where the CDN fetches content from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub id: i64,
    pub company: i64,
    pub name: String,
    pub origin: String,
    pub ssl: bool,
    pub port: u16,
    #[serde(rename = "host")]
    pub health_check_host: String,
    #[serde(rename = "health_check")]
    pub health_check_path: String,
    #[serde(rename = "status_code")]
    pub health_check_status: u16,
    #[serde(rename = "interval")]
    pub health_check_interval: u32,
    #[serde(rename = "no_probe")]
    pub health_check_disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBackend {
    pub name: String,
    pub origin: String,
    pub ssl: bool,
    pub port: u16,
    #[serde(rename = "host")]
    pub health_check_host: String,
    #[serde(rename = "health_check")]
    pub health_check_path: String,
    #[serde(rename = "status_code")]
    pub health_check_status: u16,
    #[serde(rename = "interval")]
    pub health_check_interval: u32,
    #[serde(rename = "no_probe")]
    pub health_check_disabled: bool,
}

/// VCL configuration revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VclConfig {
    pub id: i64,
    pub company: i64,
    #[serde(rename = "config_body")]
    pub body: String,
    #[serde(rename = "upload_dt")]
    pub uploaded_at: String,
    #[serde(rename = "production_dt")]
    pub deployed_at: String,
    pub validated: bool,
    pub active: bool,
    pub deployed: bool,
    pub creator_user: VclConfigCreator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VclConfigCreator {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVclConfig {
    #[serde(rename = "config_body")]
    pub body: String,
    pub comment: String,
}

/// Issued SSL certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,
    pub company: i64,
    #[serde(rename = "name")]
    pub common_name: String,
    pub domains: Vec<String>,
    pub expiration: String,
    pub autogenerated: bool,
    pub standalone: bool,
    pub dns_challenge: bool,
    #[serde(rename = "cert")]
    pub public_key: String,
    #[serde(rename = "key")]
    pub private_key: String,
}

/// Customer-supplied certificate payload for create/update.
#[derive(Debug, Clone, Serialize)]
pub struct CustomCertificate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub autogenerated: bool,
    pub dns_challenge: bool,
    #[serde(rename = "cert")]
    pub public_key: String,
    #[serde(rename = "key")]
    pub private_key: String,
}

/// DNS provider supported by the certificate-issuance hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsProvider {
    pub id: i64,
    pub hook_name: String,
    pub provider: String,
    pub keys: Vec<DnsProviderKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsProviderKey {
    #[serde(rename = "key_name_id")]
    pub id: i64,
    pub key_name: String,
}

/// Stored DNS credential referenced by DNS certificate requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCredential {
    pub id: i64,
    pub alias: String,
    pub creds: Vec<DnsCredentialEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCredentialEntry {
    pub provider: String,
    #[serde(rename = "dns_key_name")]
    pub key_name: String,
    #[serde(rename = "dns_key_value")]
    pub key_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDnsCredential {
    pub alias: String,
    pub creds: Vec<NewDnsCredentialEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDnsCredentialEntry {
    #[serde(rename = "hook_key_name")]
    pub key_name: String,
    #[serde(rename = "hook_key_value")]
    pub key_value: String,
}

/// Split a whitespace-separated domain list into unique, sorted entries.
pub fn split_domains(input: &str) -> Vec<String> {
    let mut domains: Vec<String> = input.split_whitespace().map(str::to_owned).collect();
    domains.sort();
    domains.dedup();
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_domains() {
        assert_eq!(
            split_domains("b.com\na.com\tc.com a.com\r\n"),
            vec!["a.com", "b.com", "c.com"]
        );
        assert!(split_domains("").is_empty());
    }

    #[test]
    fn test_http_cert_request_domain_list() {
        let cr = HttpCertRequest {
            id: 1,
            common_name: "www.example.com".to_string(),
            san: "example.com\nwww.example.com".to_string(),
            standalone: false,
            created_at: String::new(),
            updated_at: String::new(),
            certificate: None,
            log: None,
        };
        assert_eq!(cr.domain_list(), vec!["example.com", "www.example.com"]);
    }

    #[test]
    fn test_cert_request_nullable_fields() {
        let json = r#"{
            "id": 7,
            "credential": 3,
            "domains": "example.com",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:05:00Z",
            "certificate": null,
            "log": null
        }"#;
        let cr: DnsCertRequest = serde_json::from_str(json).unwrap();
        assert_eq!(cr.certificate, None);
        assert_eq!(cr.log, None);
    }
}
