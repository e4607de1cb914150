//! Certificate request subcommands
//!
//! Create commands block until issuance settles or the family's fixed
//! budget runs out; a request that is still in flight at that point is
//! printed as pending, not treated as a failure.

use clap::Subcommand;
use colored::Colorize;
use edgeflow_api::{ApiClient, DnsCertRequest, HttpCertRequest, parse_status_message};
use tokio_util::sync::CancellationToken;

#[derive(Subcommand)]
pub enum CertReqCommands {
    /// Certificate requests using the DNS challenge
    Dns {
        #[command(subcommand)]
        command: DnsCommands,
    },
    /// Certificate requests using the HTTP challenge
    Http {
        #[command(subcommand)]
        command: HttpCommands,
    },
}

#[derive(Subcommand)]
pub enum DnsCommands {
    /// Create a DNS certificate request and wait for issuance
    Create {
        /// Domain to cover; repeatable, wildcard entries like
        /// '*.example.com' are allowed
        #[arg(long = "domain", required = true)]
        domains: Vec<String>,
        /// DNS credential id
        #[arg(long)]
        credential: i64,
    },
    /// Show a DNS certificate request
    Show {
        /// Request id
        id: i64,
    },
    /// Change the credential of a DNS certificate request
    SetCredential {
        /// Request id
        id: i64,
        /// New DNS credential id
        credential: i64,
    },
    /// Delete a DNS certificate request
    Delete {
        /// Request id
        id: i64,
    },
    /// List the supported DNS providers
    Providers,
}

#[derive(Subcommand)]
pub enum HttpCommands {
    /// Create an HTTP certificate request and wait for issuance
    Create {
        /// Domain to cover; repeatable, wildcards are not supported
        /// (use the DNS challenge instead)
        #[arg(long = "domain", required = true)]
        domains: Vec<String>,
        /// Keep the domains on a standalone certificate instead of merging
        /// them into an existing one on renewal
        #[arg(long)]
        standalone: bool,
    },
    /// Show an HTTP certificate request. HTTP requests cannot be deleted.
    Show {
        /// Request id
        id: i64,
    },
}

pub async fn run(
    client: &ApiClient,
    command: CertReqCommands,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        CertReqCommands::Dns { command } => run_dns(client, command, cancel).await,
        CertReqCommands::Http { command } => run_http(client, command, cancel).await,
    }
}

async fn run_dns(
    client: &ApiClient,
    command: DnsCommands,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        DnsCommands::Create {
            domains,
            credential,
        } => {
            let request =
                edgeflow_provision::request_dns_certificate(client, &domains, credential, cancel)
                    .await?;
            print_dns(&request);
            Ok(())
        }
        DnsCommands::Show { id } => {
            print_dns(&client.dns_cert_request(id).await?);
            Ok(())
        }
        DnsCommands::SetCredential { id, credential } => {
            client.update_dns_cert_request(id, credential).await?;
            print_dns(&client.dns_cert_request(id).await?);
            Ok(())
        }
        DnsCommands::Delete { id } => {
            client.delete_dns_cert_request(id).await?;
            println!("{} DNS certificate request {}", "Deleted".yellow(), id);
            Ok(())
        }
        DnsCommands::Providers => {
            for provider in client.dns_providers().await? {
                let keys: Vec<&str> = provider.keys.iter().map(|k| k.key_name.as_str()).collect();
                println!(
                    "{:>4}  {}  ({})  keys: {}",
                    provider.id,
                    provider.provider,
                    provider.hook_name,
                    keys.join(", ")
                );
            }
            Ok(())
        }
    }
}

async fn run_http(
    client: &ApiClient,
    command: HttpCommands,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        HttpCommands::Create {
            domains,
            standalone,
        } => {
            let request =
                edgeflow_provision::request_http_certificate(client, &domains, standalone, cancel)
                    .await?;
            print_http(&request);
            Ok(())
        }
        HttpCommands::Show { id } => {
            print_http(&client.http_cert_request(id).await?);
            Ok(())
        }
    }
}

fn print_dns(request: &DnsCertRequest) {
    println!("DNS certificate request {}", request.id);
    println!("  domains:     {}", request.domain_list().join(", "));
    println!("  credential:  {}", request.credential);
    print_certificate_state(request.certificate, request.log.as_deref());
    println!("  created:     {}", request.created_at);
    println!("  updated:     {}", request.updated_at);
}

fn print_http(request: &HttpCertRequest) {
    println!("HTTP certificate request {}", request.id);
    println!("  domains:     {}", request.domain_list().join(", "));
    println!("  standalone:  {}", request.standalone);
    print_certificate_state(request.certificate, request.log.as_deref());
    println!("  created:     {}", request.created_at);
    println!("  updated:     {}", request.updated_at);
}

fn print_certificate_state(certificate: Option<i64>, log: Option<&str>) {
    match certificate {
        Some(id) => println!("  certificate: {}", id.to_string().green()),
        None => println!("  certificate: {}", "pending".yellow()),
    }
    if let Some(log) = log {
        println!("  status:      {}", parse_status_message(log));
    }
}
