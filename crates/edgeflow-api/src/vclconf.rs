//! VCL configuration endpoints

use crate::client::{ApiClient, ApiEnvironment};
use crate::error::{ApiError, Result};
use crate::models::{NewVclConfig, VclConfig};

impl ApiClient {
    fn vcl_configs_path(&self, env: ApiEnvironment) -> String {
        format!("/v1/{}/{}/config/", env.path_segment(), self.company_id())
    }

    pub async fn vcl_configs(&self, env: ApiEnvironment) -> Result<Vec<VclConfig>> {
        self.get_json(
            &self.vcl_configs_path(env),
            "couldn't retrieve the list of configurations",
        )
        .await
    }

    /// The active configuration is the revision with the highest id.
    pub async fn active_vcl_config(&self, env: ApiEnvironment) -> Result<VclConfig> {
        let configs = self.vcl_configs(env).await?;
        configs
            .into_iter()
            .max_by_key(|c| c.id)
            .filter(|c| c.id > 0)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "no VCL configurations found".to_string(),
            })
    }

    pub async fn create_vcl_config(
        &self,
        env: ApiEnvironment,
        config: &NewVclConfig,
    ) -> Result<VclConfig> {
        self.post_json(
            &self.vcl_configs_path(env),
            config,
            "couldn't upload the configuration",
        )
        .await
    }
}

/// Normalize a configuration body for comparison: runs of tabs and line
/// breaks collapse to a single newline and every line is trimmed.
pub fn sanitize_config(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    let mut in_break = false;
    for ch in input.trim().chars() {
        if ch == '\t' || ch == '\r' || ch == '\n' {
            if !in_break {
                normalized.push('\n');
                in_break = true;
            }
        } else {
            normalized.push(ch);
            in_break = false;
        }
    }

    let mut out = String::with_capacity(normalized.len() + 1);
    for line in normalized.split('\n') {
        out.push_str(line.trim());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_config_collapses_blank_runs() {
        let input = "sub vcl_recv {\n\n\n    set req.http.X = \"1\";\r\n}\n";
        assert_eq!(
            sanitize_config(input),
            "sub vcl_recv {\nset req.http.X = \"1\";\n}\n"
        );
    }

    #[test]
    fn test_sanitize_config_trims_lines() {
        assert_eq!(sanitize_config("  a  \n  b  "), "a\nb\n");
    }
}
