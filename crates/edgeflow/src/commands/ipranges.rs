//! Edge node IP range listing

use edgeflow_api::ApiClient;

pub async fn list(client: &ApiClient) -> anyhow::Result<()> {
    for range in client.ip_ranges().await? {
        println!("{range}");
    }
    Ok(())
}
