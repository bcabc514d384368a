use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token used for REST calls.
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    /// Hex-encoded Ed25519 key from the developer portal, used to verify
    /// inbound interactions.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Register commands on this guild only. Guild commands update
    /// immediately; global ones can take up to an hour.
    #[serde(default)]
    pub guild_id: Option<String>,
}
