mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;
mod types;
mod validate;

pub use types::Config;
pub use validate::{DiscordCredentials, MAX_PAGE_SIZE};
