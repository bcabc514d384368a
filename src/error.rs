use thiserror::Error;

use crate::pagination::SessionId;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the bot.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; glue code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum BotError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Pagination core ─────────────────────────────────────────────────
    #[error("pagination: {0}")]
    Pagination(#[from] PaginationError),

    // ── Course catalog ──────────────────────────────────────────────────
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    // ── Transport / Discord ─────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing setting: {0}")]
    Missing(&'static str),
}

// ─── Pagination errors ───────────────────────────────────────────────────────

/// Failures of the pagination session engine.
///
/// `SessionNotFound` and `Unauthorized` are answered to the user and never
/// logged above debug. `IdCollision` is resolved internally by retrying with a
/// fresh id. `RenderDefect` means the content producer handed over a malformed
/// paging state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("session {0} not found or expired")]
    SessionNotFound(SessionId),

    #[error("actor {actor} may not navigate session {session}")]
    Unauthorized { session: SessionId, actor: String },

    #[error("session id {0} already in use")]
    IdCollision(SessionId),

    #[error("cannot render page: {0}")]
    RenderDefect(String),
}

impl PaginationError {
    /// Text shown to the user who triggered the failing interaction.
    pub fn user_notice(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => {
                "This result has expired. Run the command again to get a fresh one."
            }
            Self::Unauthorized { .. } => "Only the person who ran the command can flip its pages.",
            Self::IdCollision(_) | Self::RenderDefect(_) => {
                "Something went wrong while showing this result."
            }
        }
    }

    /// Whether the failure points at a bug rather than ordinary user traffic.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::IdCollision(_) | Self::RenderDefect(_))
    }
}

// ─── Catalog errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid course number: {0:?}")]
    InvalidCourseNumber(String),

    #[error("course record {number} is malformed: {message}")]
    Malformed { number: String, message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Transport errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("discord request {route} failed: {message}")]
    Request { route: String, message: String },

    #[error("interaction signature rejected")]
    BadSignature,

    #[error("malformed interaction payload: {0}")]
    MalformedInteraction(String),
}
