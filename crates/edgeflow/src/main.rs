mod commands;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use edgeflow_api::{ApiClient, ApiConfig, DEFAULT_API_URL};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "edgeflow")]
#[command(about = "Provision CDN sites, certificates and configuration", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Management API URL
    #[arg(long, env = "EDGEFLOW_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Company id, e.g. 300
    #[arg(long, env = "EDGEFLOW_COMPANY_ID", global = true)]
    company_id: Option<i64>,

    /// API client id (dashboard -> account options -> manage keys)
    #[arg(long, env = "EDGEFLOW_CLIENT_ID", global = true, hide_env_values = true)]
    client_id: Option<String>,

    /// API client secret
    #[arg(long, env = "EDGEFLOW_CLIENT_SECRET", global = true, hide_env_values = true)]
    client_secret: Option<String>,

    /// Skip TLS certificate verification for the API URL
    #[arg(long, env = "EDGEFLOW_INSECURE", global = true)]
    insecure: bool,
}

impl ConnectionArgs {
    async fn client(&self) -> anyhow::Result<ApiClient> {
        let company_id = self
            .company_id
            .filter(|id| *id >= 1)
            .context("a company id greater than 0 is required (--company-id or EDGEFLOW_COMPANY_ID)")?;
        let client_id = self
            .client_id
            .clone()
            .filter(|id| !id.is_empty())
            .context("a client id is required (--client-id or EDGEFLOW_CLIENT_ID)")?;
        let client_secret = self
            .client_secret
            .clone()
            .filter(|secret| !secret.is_empty())
            .context("a client secret is required (--client-secret or EDGEFLOW_CLIENT_SECRET)")?;

        let client = ApiClient::connect(ApiConfig {
            base_url: self.api_url.clone(),
            company_id,
            client_id,
            client_secret,
            insecure: self.insecure,
        })
        .await?;
        Ok(client)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage company sites (domains)
    Site {
        #[command(subcommand)]
        command: commands::site::SiteCommands,
    },
    /// Manage certificate requests
    Certreq {
        #[command(subcommand)]
        command: commands::certreq::CertReqCommands,
    },
    /// Manage DNS credentials for certificate issuance
    Credential {
        #[command(subcommand)]
        command: commands::credential::CredentialCommands,
    },
    /// Manage origin backends
    Backend {
        #[command(subcommand)]
        command: commands::backend::BackendCommands,
    },
    /// Inspect and upload VCL configurations
    Vclconf {
        #[command(subcommand)]
        command: commands::vclconf::VclconfCommands,
    },
    /// List the CDN edge node IP ranges
    Ipranges,
    /// Print version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt::init();

    if matches!(cli.command, Commands::Version) {
        println!("edgeflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // IP ranges are public; everything else needs credentials.
    if matches!(cli.command, Commands::Ipranges) {
        let client = ApiClient::anonymous(cli.connection.api_url.clone())?;
        return commands::ipranges::list(&client).await;
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("{}", "interrupt received, cancelling".yellow());
                cancel.cancel();
            }
        });
    }

    let client = cli.connection.client().await?;
    match cli.command {
        Commands::Site { command } => commands::site::run(&client, command, &cancel).await,
        Commands::Certreq { command } => commands::certreq::run(&client, command, &cancel).await,
        Commands::Credential { command } => commands::credential::run(&client, command).await,
        Commands::Backend { command } => commands::backend::run(&client, command).await,
        Commands::Vclconf { command } => commands::vclconf::run(&client, command).await,
        Commands::Ipranges | Commands::Version => unreachable!("handled above"),
    }
}
