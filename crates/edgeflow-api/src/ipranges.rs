//! Edge node IP ranges
//!
//! Public endpoint; works with an anonymous client.

use crate::client::ApiClient;
use crate::error::Result;
use reqwest::Method;

impl ApiClient {
    pub async fn ip_ranges(&self) -> Result<Vec<String>> {
        let (status, body) = self
            .execute(self.request(Method::GET, "/v2/companies/ipranges"))
            .await?;
        if status != 200 {
            return Err(crate::client::status_error(
                status,
                "couldn't retrieve IP ranges",
                &body,
            ));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
