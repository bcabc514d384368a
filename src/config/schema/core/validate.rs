use super::Config;
use crate::error::ConfigError;

/// Largest page size Discord can show: an embed holds at most 25 fields.
pub const MAX_PAGE_SIZE: usize = 25;

/// Credentials needed before the bot can talk to Discord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordCredentials {
    pub bot_token: String,
    pub application_id: String,
    pub public_key: String,
    pub guild_id: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pagination = &self.pagination;
        if pagination.idle_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "pagination.idle_ttl_secs must be greater than 0".into(),
            ));
        }
        if pagination.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "pagination.sweep_interval_secs must be greater than 0".into(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&pagination.page_size) {
            return Err(ConfigError::Validation(format!(
                "pagination.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                pagination.page_size
            )));
        }
        if self.catalog.course_url_base.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.course_url_base must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Discord credentials, or the first one that is missing.
    pub fn require_discord(&self) -> Result<DiscordCredentials, ConfigError> {
        let discord = &self.discord;
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
        };

        Ok(DiscordCredentials {
            bot_token: present(&discord.bot_token)
                .ok_or(ConfigError::Missing("discord.bot_token"))?,
            application_id: present(&discord.application_id)
                .ok_or(ConfigError::Missing("discord.application_id"))?,
            public_key: present(&discord.public_key)
                .ok_or(ConfigError::Missing("discord.public_key"))?,
            guild_id: present(&discord.guild_id),
        })
    }
}
