//! Site subcommands

use clap::Subcommand;
use colored::Colorize;
use edgeflow_api::{ApiClient, Site};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Create a site and wait for domain verification
    Create {
        /// Domain in FQDN form, e.g. 'www.example.com'
        domain: String,
        /// Verification budget in seconds (default 300)
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// List sites
    List,
    /// Show one site
    Show {
        /// Site id
        id: i64,
    },
    /// Disable a site
    Delete {
        /// Site id
        id: i64,
    },
    /// Print the verification string for a domain
    Verify {
        /// Domain in FQDN form
        domain: String,
    },
}

pub async fn run(
    client: &ApiClient,
    command: SiteCommands,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        SiteCommands::Create { domain, timeout } => create(client, &domain, timeout, cancel).await,
        SiteCommands::List => list(client).await,
        SiteCommands::Show { id } => show(client, id).await,
        SiteCommands::Delete { id } => delete(client, id).await,
        SiteCommands::Verify { domain } => verify(client, &domain).await,
    }
}

async fn create(
    client: &ApiClient,
    domain: &str,
    timeout: Option<u64>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let timeout = timeout.map(Duration::from_secs);
    let site = edgeflow_provision::create_site(client, domain, timeout, cancel).await?;
    println!("{} site '{}' (id {})", "Created".green(), site.url, site.id);
    Ok(())
}

async fn list(client: &ApiClient) -> anyhow::Result<()> {
    let sites = client.sites().await?;
    if sites.is_empty() {
        println!("No sites found");
        return Ok(());
    }
    for site in sites {
        print_site(&site);
    }
    Ok(())
}

async fn show(client: &ApiClient, id: i64) -> anyhow::Result<()> {
    let site = client.site(id).await?;
    print_site(&site);
    Ok(())
}

async fn delete(client: &ApiClient, id: i64) -> anyhow::Result<()> {
    client.delete_site(id).await?;
    println!("{} site {}", "Disabled".yellow(), id);
    println!(
        "Sites are disabled rather than deleted and can only be re-enabled within \
         the same company; contact support to move a site to a different company."
    );
    Ok(())
}

async fn verify(client: &ApiClient, domain: &str) -> anyhow::Result<()> {
    match client.site_verify_string(domain).await {
        Some(txt) => {
            println!("{txt}");
            Ok(())
        }
        None => anyhow::bail!("no verification string available for '{domain}'"),
    }
}

fn print_site(site: &Site) {
    let status = if site.active {
        "active".green()
    } else {
        "inactive".red()
    };
    println!(
        "{:>8}  {}  ssl={}  {}",
        site.id, status, site.ssl, site.url
    );
}
