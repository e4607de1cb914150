//! Edgeflow management API client
//!
//! Typed, authenticated access to the CDN management API: sites,
//! certificate requests, DNS credentials, origin backends, VCL
//! configurations, issued certificates and the public IP-range listing.
//!
//! The client is created once per run and passed to every call site:
//!
//! ```ignore
//! use edgeflow_api::{ApiClient, ApiConfig, DEFAULT_API_URL};
//!
//! let client = ApiClient::connect(ApiConfig {
//!     base_url: DEFAULT_API_URL.to_string(),
//!     company_id: 300,
//!     client_id: client_id,
//!     client_secret: client_secret,
//!     insecure: false,
//! })
//! .await?;
//!
//! let sites = client.sites().await?;
//! ```
//!
//! Create calls whose validation runs out of band (certificate requests) or
//! synchronously inside the request (sites) return dedicated error variants;
//! the `edgeflow-provision` crate turns those into converged snapshots.

pub mod backends;
pub mod certificates;
pub mod certreq;
pub mod client;
pub mod credentials;
pub mod error;
pub mod ipranges;
pub mod models;
pub mod sites;
pub mod vclconf;

// Re-exports
pub use certreq::parse_status_message;
pub use client::{ApiClient, ApiConfig, ApiEnvironment, DEFAULT_API_URL};
pub use error::{ApiError, Result};
pub use models::{
    Backend, Certificate, CustomCertificate, DnsCertRequest, DnsCredential, DnsCredentialEntry,
    DnsProvider, DnsProviderKey, HttpCertRequest, NewBackend, NewDnsCertRequest, NewDnsCredential,
    NewDnsCredentialEntry, NewHttpCertRequest, NewSite, NewVclConfig, Site, TokenResponse,
    VclConfig, VclConfigCreator, split_domains,
};
pub use vclconf::sanitize_config;
