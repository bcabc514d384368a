//! Discord HTTP interactions adapter: decoding, signing checks, message
//! payloads, the reply transport and slash command registration.

pub mod commands;
pub mod http_client;
pub mod interaction;
pub mod message;
pub mod reply;
pub mod server;
pub mod signature;
pub mod types;

pub use commands::{
    COURSE_CODE_OPTION, CommandScope, FETCH_COURSE, RegisteredCommand, build_default_commands,
    register_commands, remove_commands,
};
pub use http_client::DiscordHttpClient;
pub use interaction::{
    AutocompleteRequest, CommandInvocation, CommandOption, ComponentPress, Interaction,
};
pub use message::{autocomplete_choices, notice_message, page_message};
pub use reply::InteractionReply;
pub use server::{InteractionHandler, ServerState, build_app, run_server, run_server_with_listener};
pub use signature::{InteractionVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use types::InteractionCallbackType;
