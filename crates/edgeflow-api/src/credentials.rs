//! DNS credential endpoints
//!
//! Credentials hold the provider keys the certificate-issuance hooks use to
//! answer DNS challenges. They are referenced by id from DNS certificate
//! requests.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{DnsCredential, NewDnsCredential};

impl ApiClient {
    fn dns_credentials_path(&self) -> String {
        format!("/v1/autoprovisioning/{}/dnshook/credentials/", self.company_id())
    }

    pub async fn dns_credentials(&self) -> Result<Vec<DnsCredential>> {
        self.get_json(
            &self.dns_credentials_path(),
            "couldn't retrieve the list of DNS credentials",
        )
        .await
    }

    pub async fn dns_credential(&self, id: i64) -> Result<DnsCredential> {
        self.get_json(
            &format!("{}{}/", self.dns_credentials_path(), id),
            &format!("couldn't retrieve the DNS credential with id {id}"),
        )
        .await
    }

    pub async fn create_dns_credential(&self, credential: &NewDnsCredential) -> Result<DnsCredential> {
        self.post_json(
            &self.dns_credentials_path(),
            credential,
            &format!("couldn't create the DNS credential '{}'", credential.alias),
        )
        .await
    }

    pub async fn update_dns_credential(
        &self,
        id: i64,
        credential: &NewDnsCredential,
    ) -> Result<DnsCredential> {
        self.put_json(
            &format!("{}{}/", self.dns_credentials_path(), id),
            credential,
            &format!("couldn't update the DNS credential with id {id}"),
        )
        .await
    }

    pub async fn delete_dns_credential(&self, id: i64) -> Result<()> {
        self.delete(
            &format!("{}{}/", self.dns_credentials_path(), id),
            &format!("API request failed trying to delete the DNS credential with id {id}"),
        )
        .await
    }
}
