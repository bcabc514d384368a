use anyhow::Result;
use serde_json::json;

use super::http_client::DiscordHttpClient;
use super::types::CommandOptionType;

pub const FETCH_COURSE: &str = "fetch_course";
pub const COURSE_CODE_OPTION: &str = "course_code";

pub fn build_default_commands() -> Vec<serde_json::Value> {
    vec![json!({
        "name": FETCH_COURSE,
        "description": "Fetches a specific DTU course",
        "type": 1,
        "options": [
            {
                "name": COURSE_CODE_OPTION,
                "description": "The course code to fetch",
                "type": CommandOptionType::String as u8,
                "required": true,
                "autocomplete": true
            }
        ]
    })]
}

/// A command as Discord stored it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: String,
    pub name: String,
}

/// Where registered commands live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScope {
    pub application_id: String,
    pub guild_id: Option<String>,
}

pub async fn register_commands(
    http: &DiscordHttpClient,
    scope: &CommandScope,
    commands: &[serde_json::Value],
) -> Result<Vec<RegisteredCommand>> {
    let stored = http
        .register_commands(&scope.application_id, scope.guild_id.as_deref(), commands)
        .await?;

    let registered: Vec<RegisteredCommand> = stored
        .iter()
        .filter_map(|command| {
            Some(RegisteredCommand {
                id: command.get("id")?.as_str()?.to_string(),
                name: command.get("name")?.as_str()?.to_string(),
            })
        })
        .collect();
    for command in &registered {
        tracing::info!(id = %command.id, name = %command.name, "registered slash command");
    }
    Ok(registered)
}

/// Delete each command in turn. Keeps going past failures and returns how
/// many were removed.
pub async fn remove_commands(
    http: &DiscordHttpClient,
    scope: &CommandScope,
    registered: &[RegisteredCommand],
) -> usize {
    let mut removed = 0;
    for command in registered {
        match http
            .delete_command(&scope.application_id, scope.guild_id.as_deref(), &command.id)
            .await
        {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!(name = %command.name, "cannot delete slash command: {e:#}"),
        }
    }
    removed
}
