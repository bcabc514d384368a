//! Pagination session engine.
//!
//! Content producers hand over a [`PagingState`]; the [`InitialResponder`]
//! stores it and sends page 0. Button presses come back as
//! [`NavigationEvent`]s and the [`InteractionRouter`] moves the session
//! through the [`SessionStore`]. None of it talks to the network directly;
//! replies go out through a [`Transport`].

pub mod controls;
pub mod id;
pub mod render;
pub mod responder;
pub mod router;
pub mod section;
pub mod state;
pub mod store;
pub mod transport;

pub use controls::{Direction, NavigationEvent, encode_control};
pub use id::{IdGenerator, RandomIds, SessionId};
pub use render::{RenderedField, RenderedPage, render};
pub use responder::InitialResponder;
pub use router::InteractionRouter;
pub use section::{CourseTypeEntry, Field, FieldStyle, Fields, Section};
pub use state::{DisplayMeta, PagingState};
pub use store::SessionStore;
pub use transport::Transport;
