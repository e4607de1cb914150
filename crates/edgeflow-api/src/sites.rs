//! Site (domain) endpoints
//!
//! Site creation is the one call in the API where validation runs
//! synchronously inside the request: the backend verifies domain ownership
//! before answering, so a not-yet-verified domain surfaces as a dedicated
//! error variant instead of a pending resource.

use crate::client::{ApiClient, parse_api_error, status_error};
use crate::error::{ApiError, Result};
use crate::models::{NewSite, Site, SiteVerifyRequest, SiteVerifyResponse};
use reqwest::Method;

impl ApiClient {
    fn sites_path(&self) -> String {
        format!("/v1/companies/{}/sites/", self.company_id())
    }

    pub async fn sites(&self) -> Result<Vec<Site>> {
        self.get_json(&self.sites_path(), "couldn't retrieve the list of sites")
            .await
    }

    pub async fn site(&self, id: i64) -> Result<Site> {
        self.get_json(
            &format!("{}{}/", self.sites_path(), id),
            &format!("couldn't retrieve the site with id {id}"),
        )
        .await
    }

    /// Look a site up by its domain. Used when the server-assigned id is not
    /// known (idempotent creation) or no longer resolves.
    pub async fn site_by_domain(&self, domain: &str) -> Result<Option<Site>> {
        Ok(self.sites().await?.into_iter().find(|s| s.url == domain))
    }

    /// Create a site.
    ///
    /// A 403 means domain-ownership verification has not passed; the error
    /// message embeds the verification instructions and, best effort, the
    /// verification string itself. A 400 reporting an existing site maps to
    /// [`ApiError::SiteExists`] so callers can converge on the existing
    /// resource.
    pub async fn create_site(&self, domain: &str) -> Result<Site> {
        let payload = NewSite {
            url: domain.to_string(),
        };
        let (status, body) = self
            .execute(self.request(Method::POST, &self.sites_path()).json(&payload))
            .await?;

        match status {
            // 200 = new site, 201 = re-activated
            200 | 201 => Ok(serde_json::from_str(&body)?),
            502 => Err(ApiError::Status {
                status,
                message: "error creating the site".to_string(),
            }),
            403 => Err(ApiError::SiteVerification {
                message: self.verification_help(domain, &body).await,
            }),
            400 if body.contains("Site ownership denied") => {
                Err(ApiError::SiteNotOwned(parse_api_error(&body)))
            }
            400 if parse_api_error(&body).contains("already exists") => {
                Err(ApiError::SiteExists {
                    message: parse_api_error(&body),
                })
            }
            _ => Err(status_error(
                status,
                &format!("couldn't create the site '{domain}'"),
                &body,
            )),
        }
    }

    /// Disable a site. The API answers 204; sites are disabled rather than
    /// deleted and can only be re-enabled within the same company.
    pub async fn delete_site(&self, id: i64) -> Result<()> {
        self.delete(
            &format!("{}{}/", self.sites_path(), id),
            &format!("API request failed trying to delete the site with id {id}"),
        )
        .await
    }

    /// Verification string for a domain, best effort: any failure yields
    /// `None` instead of an error.
    pub async fn site_verify_string(&self, domain: &str) -> Option<String> {
        let payload = SiteVerifyRequest {
            domain: domain.to_string(),
        };
        let path = format!("/v1/companies/{}/siteverification/", self.company_id());
        let (status, body) = self
            .execute(self.request(Method::POST, &path).json(&payload))
            .await
            .ok()?;
        if status != 200 {
            return None;
        }
        serde_json::from_str::<SiteVerifyResponse>(&body)
            .ok()
            .map(|r| r.txt)
    }

    async fn verification_help(&self, domain: &str, body: &str) -> String {
        let mut msg = format!(
            "please ensure that the site can be verified with one of the following two options:\n\
             \x20 * Option 1: an edgeflow-verify.txt file in the root of your site with the verification string\n\
             \x20 * Option 2: a TXT record '_edgeflow-challenge.{domain}' with the verification string\n"
        );
        if let Some(txt) = self.site_verify_string(domain).await {
            msg.push_str(&format!("\nThe verification string for this site is: {txt}\n"));
        }
        msg.push_str(&format!("\nAPI response: {}", parse_api_error(body)));
        msg
    }
}
