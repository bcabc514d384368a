pub mod schema;

pub use schema::{
    CatalogConfig, Config, DiscordConfig, DiscordCredentials, MAX_PAGE_SIZE, PaginationConfig,
    ServerConfig,
};
