//! Origin backend subcommands

use clap::Subcommand;
use colored::Colorize;
use edgeflow_api::{ApiClient, ApiEnvironment, Backend, NewBackend};

#[derive(Subcommand)]
pub enum BackendCommands {
    /// List backends
    List {
        /// Use the staging environment
        #[arg(long)]
        staging: bool,
    },
    /// Show one backend
    Show {
        /// Backend id
        id: i64,
        #[arg(long)]
        staging: bool,
    },
    /// Create a backend
    Create {
        /// Backend name
        name: String,
        /// Origin host or IP the CDN fetches content from
        origin: String,
        /// Origin port
        #[arg(long, default_value_t = 80)]
        port: u16,
        /// Use TLS towards the origin
        #[arg(long)]
        ssl: bool,
        /// Host header for health checks (defaults to the origin)
        #[arg(long)]
        health_check_host: Option<String>,
        /// Health check path
        #[arg(long, default_value = "/")]
        health_check_path: String,
        /// Expected health check status code
        #[arg(long, default_value_t = 200)]
        health_check_status: u16,
        /// Health check interval in seconds
        #[arg(long, default_value_t = 40)]
        health_check_interval: u32,
        /// Disable health probes
        #[arg(long)]
        no_probe: bool,
        #[arg(long)]
        staging: bool,
    },
    /// Delete a backend
    Delete {
        /// Backend id
        id: i64,
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

pub async fn run(client: &ApiClient, command: BackendCommands) -> anyhow::Result<()> {
    match command {
        BackendCommands::List { staging } => {
            let backends = client.backends(environment(staging)).await?;
            if backends.is_empty() {
                println!("No backends found");
                return Ok(());
            }
            for backend in backends {
                print_backend(&backend);
            }
            Ok(())
        }
        BackendCommands::Show { id, staging } => {
            print_backend(&client.backend(environment(staging), id).await?);
            Ok(())
        }
        BackendCommands::Create {
            name,
            origin,
            port,
            ssl,
            health_check_host,
            health_check_path,
            health_check_status,
            health_check_interval,
            no_probe,
            staging,
        } => {
            let payload = NewBackend {
                health_check_host: health_check_host.unwrap_or_else(|| origin.clone()),
                name,
                origin,
                ssl,
                port,
                health_check_path,
                health_check_status,
                health_check_interval,
                health_check_disabled: no_probe,
            };
            let backend = client
                .create_backend(environment(staging), &payload)
                .await?;
            println!("{} backend '{}' (id {})", "Created".green(), backend.name, backend.id);
            Ok(())
        }
        BackendCommands::Delete { id, staging } => {
            client.delete_backend(environment(staging), id).await?;
            println!("{} backend {}", "Deleted".yellow(), id);
            Ok(())
        }
    }
}

fn print_backend(backend: &Backend) {
    let scheme = if backend.ssl { "https" } else { "http" };
    println!(
        "{:>8}  {}  {}://{}:{}",
        backend.id, backend.name, scheme, backend.origin, backend.port
    );
    if backend.health_check_disabled {
        println!("          health check: disabled");
    } else {
        println!(
            "          health check: {} every {}s, expect {}",
            backend.health_check_path, backend.health_check_interval, backend.health_check_status
        );
    }
}
