use anyhow::Result;
use catalog_client::{CatalogClient, Credentials};
use clap::Parser;
use resources::{
    AccessControlResource, DataMaskResource, DatasourceResource, HypertableResource,
    RowFilterResource, ScheduledHypertableResource
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
mod settings;

use commands::{Cli, Commands, login, resource};
use settings::ConfigSources;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let sources = ConfigSources::load(&cli.global)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(sources.logging_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = sources.resolve()?;
    let provider = &config.provider;
    let client = Arc::new(CatalogClient::new(
        Credentials::new(
            &provider.host,
            &provider.organisationname,
            &provider.email,
            &provider.password
        ),
        Duration::from_secs(provider.timeout_seconds)
    )?);

    match cli.command {
        Commands::Login => login::run(&client).await,
        Commands::Datasource(action) => {
            resource::run(&DatasourceResource::new(client), action).await
        }
        Commands::Hypertable(action) => {
            resource::run(&HypertableResource::new(client), action).await
        }
        Commands::HypertableScheduled(action) => {
            resource::run(&ScheduledHypertableResource::new(client), action).await
        }
        Commands::AccessControl(action) => {
            resource::run(&AccessControlResource::new(client), action).await
        }
        Commands::DataMask(action) => resource::run(&DataMaskResource::new(client), action).await,
        Commands::RowFilter(action) => resource::run(&RowFilterResource::new(client), action).await
    }
}
