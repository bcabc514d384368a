use super::Config;
use std::path::PathBuf;

#[cfg(test)]
pub(super) const ENV_KEYS: &[&str] = &[
    "DTU_BOT_TOKEN",
    "BOT_TOKEN",
    "DTU_BOT_GUILD_ID",
    "UNIQUE_SERVER_ID",
    "DTU_BOT_APPLICATION_ID",
    "DTU_BOT_PUBLIC_KEY",
    "DTU_BOT_HOST",
    "DTU_BOT_PORT",
    "DTU_BOT_CATALOG_DIR",
];

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl Config {
    /// Environment wins over the file. The unprefixed names are the ones the
    /// bot's `.env` files have always used.
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty("DTU_BOT_TOKEN").or_else(|| non_empty("BOT_TOKEN")) {
            self.discord.bot_token = Some(token);
        }

        if let Some(guild) = non_empty("DTU_BOT_GUILD_ID").or_else(|| non_empty("UNIQUE_SERVER_ID"))
        {
            self.discord.guild_id = Some(guild);
        }

        if let Some(application_id) = non_empty("DTU_BOT_APPLICATION_ID") {
            self.discord.application_id = Some(application_id);
        }

        if let Some(public_key) = non_empty("DTU_BOT_PUBLIC_KEY") {
            self.discord.public_key = Some(public_key);
        }

        if let Some(host) = non_empty("DTU_BOT_HOST") {
            self.server.host = host;
        }

        if let Some(port_str) = non_empty("DTU_BOT_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port_str, "ignoring unparsable DTU_BOT_PORT"),
            }
        }

        if let Some(dir) = non_empty("DTU_BOT_CATALOG_DIR") {
            self.catalog.dir = PathBuf::from(dir);
        }
    }
}
