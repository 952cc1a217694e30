//! Read-only view of the command dictionary.

use axum::Json;
use serde::Serialize;

use quadsim_core::COMMAND_TABLE;

#[derive(Debug, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub arg_count: usize,
    pub description: &'static str,
}

/// List every supported command. GET /v1/commands
pub async fn list_commands() -> Json<Vec<CommandInfo>> {
    Json(
        COMMAND_TABLE
            .iter()
            .map(|spec| CommandInfo {
                name: spec.name,
                arg_count: spec.arg_count,
                description: spec.description,
            })
            .collect(),
    )
}
