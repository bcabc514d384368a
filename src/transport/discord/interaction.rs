//! Inbound interaction payloads, decoded into what the bot acts on.

use serde_json::Value;

use super::types::InteractionType;
use crate::error::TransportError;

/// One option of a slash command, flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub value: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub options: Vec<CommandOption>,
    pub user_id: String,
}

impl CommandInvocation {
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| option.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteRequest {
    pub command: String,
    /// The option being typed into, if Discord marked one.
    pub focused: Option<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPress {
    pub custom_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Ping,
    Command(CommandInvocation),
    Autocomplete(AutocompleteRequest),
    Component(ComponentPress),
    /// A type this bot does not handle, kept for logging.
    Unsupported(u64),
}

impl Interaction {
    /// Decode a raw interaction body.
    pub fn decode(body: &[u8]) -> Result<Self, TransportError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| TransportError::MalformedInteraction(e.to_string()))?;
        Self::from_value(&payload)
    }

    pub fn from_value(payload: &Value) -> Result<Self, TransportError> {
        let kind = payload
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| malformed("missing interaction type"))?;

        let Some(kind_enum) = InteractionType::from_u64(kind) else {
            return Ok(Self::Unsupported(kind));
        };

        match kind_enum {
            InteractionType::Ping => Ok(Self::Ping),
            InteractionType::ApplicationCommand => {
                let data = data(payload)?;
                Ok(Self::Command(CommandInvocation {
                    name: command_name(data)?,
                    options: parse_options(data),
                    user_id: user_id(payload)?,
                }))
            }
            InteractionType::ApplicationCommandAutocomplete => {
                let data = data(payload)?;
                Ok(Self::Autocomplete(AutocompleteRequest {
                    command: command_name(data)?,
                    focused: parse_options(data).into_iter().find(|option| option.focused),
                }))
            }
            InteractionType::MessageComponent => {
                let custom_id = data(payload)?
                    .get("custom_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| malformed("component without custom_id"))?
                    .to_string();
                Ok(Self::Component(ComponentPress {
                    custom_id,
                    user_id: user_id(payload)?,
                }))
            }
            InteractionType::ModalSubmit => Ok(Self::Unsupported(kind)),
        }
    }
}

fn malformed(message: &str) -> TransportError {
    TransportError::MalformedInteraction(message.to_string())
}

fn data(payload: &Value) -> Result<&Value, TransportError> {
    payload
        .get("data")
        .ok_or_else(|| malformed("interaction without data"))
}

fn command_name(data: &Value) -> Result<String, TransportError> {
    data.get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| malformed("command without name"))
}

/// Guild interactions carry `member.user`, direct messages carry `user`.
fn user_id(payload: &Value) -> Result<String, TransportError> {
    payload
        .get("member")
        .and_then(|member| member.get("user"))
        .and_then(|user| user.get("id"))
        .and_then(Value::as_str)
        .or_else(|| {
            payload
                .get("user")
                .and_then(|user| user.get("id"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
        .ok_or_else(|| malformed("interaction without user"))
}

fn parse_options(data: &Value) -> Vec<CommandOption> {
    data.get("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|option| {
                    let name = option.get("name")?.as_str()?.to_string();
                    let value = match option.get("value")? {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    Some(CommandOption {
                        name,
                        value,
                        focused: option
                            .get("focused")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
