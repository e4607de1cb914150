//! SSL certificate endpoints

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{Certificate, CustomCertificate};

impl ApiClient {
    fn certificates_path(&self) -> String {
        format!("/v1/autoprovisioning/{}/sslconfig/", self.company_id())
    }

    pub async fn certificates(&self) -> Result<Vec<Certificate>> {
        self.get_json(
            &self.certificates_path(),
            "couldn't retrieve the list of certificates",
        )
        .await
    }

    pub async fn certificate(&self, id: i64) -> Result<Certificate> {
        self.get_json(
            &format!("{}{}/", self.certificates_path(), id),
            &format!("couldn't retrieve the certificate with id {id}"),
        )
        .await
    }

    pub async fn create_custom_certificate(&self, cert: &CustomCertificate) -> Result<Certificate> {
        self.post_json(
            &self.certificates_path(),
            cert,
            "couldn't upload the custom certificate",
        )
        .await
    }

    /// The update endpoint does not return the new model; re-read it so the
    /// caller always observes a fresh snapshot.
    pub async fn update_custom_certificate(&self, cert: &CustomCertificate) -> Result<Certificate> {
        let id = cert.id.ok_or_else(|| ApiError::Status {
            status: 400,
            message: "a certificate id is required for updates".to_string(),
        })?;
        let path = format!("{}{}/", self.certificates_path(), id);
        let (status, body) = self
            .execute(self.request(reqwest::Method::PUT, &path).json(cert))
            .await?;
        if status != 200 && status != 201 {
            return Err(crate::client::status_error(
                status,
                &format!("couldn't update the certificate with id {id}"),
                &body,
            ));
        }
        self.certificate(id).await.map_err(|err| match err {
            ApiError::Status { status, message } => ApiError::Status {
                status,
                message: format!(
                    "certificate was updated but the new data couldn't be retrieved, \
                     an import is required: {message}"
                ),
            },
            other => other,
        })
    }

    pub async fn delete_certificate(&self, id: i64) -> Result<()> {
        self.delete(
            &format!("{}{}/", self.certificates_path(), id),
            &format!("API request failed trying to delete the certificate with id {id}"),
        )
        .await
    }
}
