use crate::output;
use anyhow::{Context, Result};
use catalog_client::CatalogClient;

pub async fn run(client: &CatalogClient) -> Result<()> {
    client
        .login()
        .await
        .with_context(|| format!("Login to {} failed", client.host()))?;

    output::success(&format!(
        "logged in to {} as {}",
        client.host(),
        client.sessions().credentials().email()
    ));
    Ok(())
}
