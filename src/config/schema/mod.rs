mod catalog;
mod core;
mod discord;
mod pagination;
mod server;

pub use catalog::CatalogConfig;
pub use core::{Config, DiscordCredentials, MAX_PAGE_SIZE};
pub use discord::DiscordConfig;
pub use pagination::PaginationConfig;
pub use server::ServerConfig;
