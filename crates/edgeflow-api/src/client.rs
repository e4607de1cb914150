//! Authenticated HTTP client for the management API
//!
//! One client is created per run and threaded through every call site. The
//! bearer token is acquired once at connect time with the OAuth2
//! client-credentials grant; token lifecycle belongs to this client, not to
//! its callers.

use crate::error::{ApiError, Result};
use crate::models::TokenResponse;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.edgeflow.dev";

const HTTP_TIMEOUT: Duration = Duration::from_secs(50);
const TOKEN_PATH: &str = "/v1/oauth2/access_token/";

/// API environment selecting the provisioning path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    #[default]
    Production,
    Staging,
}

impl ApiEnvironment {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiEnvironment::Production => "autoprovisioning",
            ApiEnvironment::Staging => "staging",
        }
    }
}

impl std::fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiEnvironment::Production => write!(f, "production"),
            ApiEnvironment::Staging => write!(f, "staging"),
        }
    }
}

/// Connection settings for [`ApiClient::connect`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub company_id: i64,
    pub client_id: String,
    pub client_secret: String,
    /// Skip TLS certificate verification for `base_url`.
    pub insecure: bool,
}

/// Authenticated management API client.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    company_id: i64,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client and acquire an access token.
    pub async fn connect(config: ApiConfig) -> Result<Self> {
        let mut client = Self {
            http: build_http(config.insecure)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            company_id: config.company_id,
            token: None,
        };
        let token = client
            .fetch_token(&config.client_id, &config.client_secret)
            .await?;
        client.token = Some(token);
        tracing::debug!(company_id = config.company_id, "management API client ready");
        Ok(client)
    }

    /// Client without credentials, usable only for public endpoints.
    pub fn anonymous(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: build_http(false)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            company_id: 0,
            token: None,
        })
    }

    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    async fn fetch_token(&self, client_id: &str, client_secret: &str) -> Result<String> {
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "client_credentials"),
        ];
        let resp = self.http.post(self.url(TOKEN_PATH)).form(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.as_u16() == 401 {
            return Err(ApiError::AuthenticationFailed(
                "please ensure the credentials are correct".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(ApiError::AuthenticationFailed(parse_api_error(&body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        if token.access_token.is_empty() {
            return Err(ApiError::AuthenticationFailed(
                "the API returned an empty access token".to_string(),
            ));
        }
        Ok(token.access_token)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a request and read the full response body.
    pub(crate) async fn execute(&self, req: reqwest::RequestBuilder) -> Result<(u16, String)> {
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok((status, body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        let (status, body) = self.execute(self.request(Method::GET, path)).await?;
        if status != 200 {
            return Err(status_error(status, context, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON payload; the API answers 200 for new resources and 201
    /// for reactivated ones.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        context: &str,
    ) -> Result<T> {
        let (status, body) = self
            .execute(self.request(Method::POST, path).json(payload))
            .await?;
        if status != 200 && status != 201 {
            return Err(status_error(status, context, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        context: &str,
    ) -> Result<T> {
        let (status, body) = self
            .execute(self.request(Method::PUT, path).json(payload))
            .await?;
        if status != 200 && status != 201 {
            return Err(status_error(status, context, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// DELETE a resource; the API answers 204 on success.
    pub(crate) async fn delete(&self, path: &str, context: &str) -> Result<()> {
        let (status, body) = self.execute(self.request(Method::DELETE, path)).await?;
        if status != 204 {
            return Err(status_error(status, context, &body));
        }
        Ok(())
    }
}

fn build_http(insecure: bool) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("edgeflow/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(insecure)
        .build()?;
    Ok(client)
}

pub(crate) fn status_error(status: u16, context: &str, body: &str) -> ApiError {
    ApiError::Status {
        status,
        message: format!("{context}: {}", parse_api_error(body)),
    }
}

/// Decode an error body of the `{"message"}` or `{"detail"}` shape, falling
/// back to the body verbatim when it matches neither.
pub(crate) fn parse_api_error(body: &str) -> String {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ApiMessage {
        message: String,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ApiDetail {
        detail: String,
    }

    if let Ok(m) = serde_json::from_str::<ApiMessage>(body) {
        return m.message;
    }
    if let Ok(d) = serde_json::from_str::<ApiDetail>(body) {
        return d.detail;
    }
    body.to_string()
}
