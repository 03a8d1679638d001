use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use resources::{Resource, ResourceResponse};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ResourceAction {
    #[command(about = "Create from a JSON plan")]
    Create {
        #[arg(long, help = "Plan file (JSON)")]
        plan: PathBuf
    },

    #[command(about = "Refresh the state of an existing object")]
    Read {
        #[arg(long, help = "State id returned by create")]
        id: String,

        #[arg(long, help = "Last known state (JSON), returned as-is when absent")]
        state: Option<PathBuf>
    },

    #[command(about = "Apply a JSON plan to an existing object")]
    Update {
        #[arg(long, help = "State id returned by create")]
        id: String,

        #[arg(long, help = "Plan file (JSON)")]
        plan: PathBuf
    },

    #[command(about = "Delete an object")]
    Delete {
        #[arg(long, help = "State id returned by create")]
        id: String
    }
}

pub async fn run<R: Resource>(resource: &R, action: ResourceAction) -> Result<()> {
    let type_name = resource.type_name();

    match action {
        ResourceAction::Create { plan } => {
            let plan: R::Model = read_json(&plan)?;
            let response = resource
                .create(&plan)
                .await
                .with_context(|| format!("{} create failed", type_name))?;
            print_response(&response)
        }
        ResourceAction::Read { id, state } => {
            let prior: R::Model = match state {
                Some(path) => read_json(&path)?,
                None => R::Model::default()
            };
            let response = resource
                .read(&id, prior)
                .await
                .with_context(|| format!("{} read failed", type_name))?;
            print_response(&response)
        }
        ResourceAction::Update { id, plan } => {
            let plan: R::Model = read_json(&plan)?;
            let response = resource
                .update(&id, &plan)
                .await
                .with_context(|| format!("{} update failed", type_name))?;
            print_response(&response)
        }
        ResourceAction::Delete { id } => {
            resource
                .delete(&id)
                .await
                .with_context(|| format!("{} delete failed", type_name))?;
            info!(resource = %type_name, id = %id, "Deleted");
            output::success(&format!("deleted {}", id));
            Ok(())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_response<T: serde::Serialize>(response: &ResourceResponse<T>) -> Result<()> {
    output::json(response)
}
