//! VCL configuration subcommands

use clap::Subcommand;
use colored::Colorize;
use edgeflow_api::{ApiClient, ApiEnvironment, NewVclConfig, VclConfig};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum VclconfCommands {
    /// Show the active configuration
    Show {
        /// Print the configuration body instead of the summary
        #[arg(long)]
        body: bool,
        /// Use the staging environment
        #[arg(long)]
        staging: bool,
    },
    /// Upload a configuration from a file
    Push {
        /// Path to the configuration file
        file: PathBuf,
        /// Comment attached to the revision
        #[arg(long, default_value = "Uploaded with edgeflow")]
        comment: String,
        #[arg(long)]
        staging: bool,
    },
}

fn environment(staging: bool) -> ApiEnvironment {
    if staging {
        ApiEnvironment::Staging
    } else {
        ApiEnvironment::Production
    }
}

pub async fn run(client: &ApiClient, command: VclconfCommands) -> anyhow::Result<()> {
    match command {
        VclconfCommands::Show { body, staging } => {
            let config = client.active_vcl_config(environment(staging)).await?;
            if body {
                print!("{}", config.body);
            } else {
                print_summary(&config);
            }
            Ok(())
        }
        VclconfCommands::Push {
            file,
            comment,
            staging,
        } => {
            let body = std::fs::read_to_string(&file)
                .map_err(|err| anyhow::anyhow!("couldn't read '{}': {err}", file.display()))?;
            let config = client
                .create_vcl_config(environment(staging), &NewVclConfig { body, comment })
                .await?;
            println!("{} configuration revision {}", "Uploaded".green(), config.id);
            Ok(())
        }
    }
}

fn print_summary(config: &VclConfig) {
    println!("Configuration revision {}", config.id);
    println!("  uploaded:  {} by {}", config.uploaded_at, config.creator_user.username);
    println!("  deployed:  {}", config.deployed_at);
    println!(
        "  validated: {}  active: {}  deployed: {}",
        config.validated, config.active, config.deployed
    );
}
