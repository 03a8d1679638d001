pub mod login;
pub mod resource;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use resource::ResourceAction;

#[derive(Parser)]
#[command(
    name = "zmesh",
    author,
    version,
    about = "ZMesh - manage catalog objects and member policies",
    long_about = "Declarative create/read/update/delete for ZMesh data sources, hypertables \
                  and per-member access grants, data masks and row filters.\n\nConnection \
                  settings come from flags, ZMESH_* environment variables or a TOML/YAML \
                  config file, in that order of precedence."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "ZMESH_CONFIG", help = "Config file (.toml, .yaml or .yml)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Catalog API base URL")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Organisation to log in to")]
    pub organisation: Option<String>,

    #[arg(long, global = true, help = "Login e-mail")]
    pub email: Option<String>,

    #[arg(long, global = true, help = "HTTP timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Logging level (trace/debug/info/warn/error)")]
    pub log_level: Option<String>
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Verify credentials by logging in")]
    Login,

    #[command(subcommand, about = "Manage data sources")]
    Datasource(ResourceAction),

    #[command(subcommand, about = "Manage live hypertables")]
    Hypertable(ResourceAction),

    #[command(subcommand, about = "Manage scheduled hypertables")]
    HypertableScheduled(ResourceAction),

    #[command(subcommand, about = "Manage per-member hypertable access grants")]
    AccessControl(ResourceAction),

    #[command(subcommand, about = "Manage per-member column masks")]
    DataMask(ResourceAction),

    #[command(subcommand, about = "Manage per-member row filters")]
    RowFilter(ResourceAction)
}
