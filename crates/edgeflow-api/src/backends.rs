//! Origin server (backend) endpoints

use crate::client::{ApiClient, ApiEnvironment};
use crate::error::{ApiError, Result};
use crate::models::{Backend, NewBackend};
use reqwest::Method;

impl ApiClient {
    fn backends_path(&self, env: ApiEnvironment) -> String {
        format!("/v1/{}/{}/backends/", env.path_segment(), self.company_id())
    }

    pub async fn backends(&self, env: ApiEnvironment) -> Result<Vec<Backend>> {
        self.get_json(&self.backends_path(env), "couldn't retrieve the list of backends")
            .await
    }

    pub async fn backend(&self, env: ApiEnvironment, id: i64) -> Result<Backend> {
        self.get_json(
            &format!("{}{}/", self.backends_path(env), id),
            &format!("couldn't retrieve the backend with id {id}"),
        )
        .await
    }

    pub async fn create_backend(&self, env: ApiEnvironment, backend: &NewBackend) -> Result<Backend> {
        self.post_json(
            &self.backends_path(env),
            backend,
            &format!("couldn't create the backend '{}'", backend.name),
        )
        .await
    }

    pub async fn update_backend(
        &self,
        env: ApiEnvironment,
        id: i64,
        backend: &NewBackend,
    ) -> Result<Backend> {
        self.put_json(
            &format!("{}{}/", self.backends_path(env), id),
            backend,
            &format!("couldn't update the backend with id {id}"),
        )
        .await
    }

    pub async fn delete_backend(&self, env: ApiEnvironment, id: i64) -> Result<()> {
        let path = format!("{}{}/", self.backends_path(env), id);
        let (status, body) = self.execute(self.request(Method::DELETE, &path)).await?;
        if status == 403 && body.contains("references in active config") {
            return Err(ApiError::Status {
                status,
                message: "cannot delete a backend with references in the active configuration, \
                          please remove all the references from the configuration first"
                    .to_string(),
            });
        }
        if status != 204 {
            return Err(crate::client::status_error(
                status,
                &format!("API request failed trying to delete the backend with id {id}"),
                &body,
            ));
        }
        Ok(())
    }
}
