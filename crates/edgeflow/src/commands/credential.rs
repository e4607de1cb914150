//! DNS credential subcommands

use clap::Subcommand;
use colored::Colorize;
use edgeflow_api::{ApiClient, DnsCredential, NewDnsCredential, NewDnsCredentialEntry};

#[derive(Subcommand)]
pub enum CredentialCommands {
    /// List DNS credentials
    List,
    /// Show one DNS credential
    Show {
        /// Credential id
        id: i64,
    },
    /// Create a DNS credential
    Create {
        /// Credential alias
        #[arg(long)]
        alias: String,
        /// Provider key as NAME=VALUE; repeatable
        #[arg(long = "key", required = true, value_parser = parse_key_value)]
        keys: Vec<(String, String)>,
    },
    /// Delete a DNS credential
    Delete {
        /// Credential id
        id: i64,
    },
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("'{input}' is not of the form NAME=VALUE")),
    }
}

pub async fn run(client: &ApiClient, command: CredentialCommands) -> anyhow::Result<()> {
    match command {
        CredentialCommands::List => {
            let credentials = client.dns_credentials().await?;
            if credentials.is_empty() {
                println!("No DNS credentials found");
                return Ok(());
            }
            for credential in credentials {
                print_credential(&credential);
            }
            Ok(())
        }
        CredentialCommands::Show { id } => {
            print_credential(&client.dns_credential(id).await?);
            Ok(())
        }
        CredentialCommands::Create { alias, keys } => {
            let payload = NewDnsCredential {
                alias,
                creds: keys
                    .into_iter()
                    .map(|(key_name, key_value)| NewDnsCredentialEntry {
                        key_name,
                        key_value,
                    })
                    .collect(),
            };
            let credential = client.create_dns_credential(&payload).await?;
            println!(
                "{} DNS credential '{}' (id {})",
                "Created".green(),
                credential.alias,
                credential.id
            );
            Ok(())
        }
        CredentialCommands::Delete { id } => {
            client.delete_dns_credential(id).await?;
            println!("{} DNS credential {}", "Deleted".yellow(), id);
            Ok(())
        }
    }
}

fn print_credential(credential: &DnsCredential) {
    println!("{:>4}  {}", credential.id, credential.alias);
    for entry in &credential.creds {
        // Key values are secrets; only the provider and key names are shown.
        println!("      {} {}", entry.provider, entry.key_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("API_TOKEN=abc"),
            Ok(("API_TOKEN".to_string(), "abc".to_string()))
        );
        assert_eq!(
            parse_key_value("A=b=c"),
            Ok(("A".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_value("no-separator").is_err());
        assert!(parse_key_value("=value").is_err());
    }
}
