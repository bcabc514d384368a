//! Navigation controls embedded in outbound messages.
//!
//! A control's payload is `paginate:<session id>:<prev|next>`. The session id
//! is opaque to everyone but the store.

use super::id::SessionId;

const PREFIX: &str = "paginate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Payload for the control that moves `session` in `direction`.
pub fn encode_control(session: &SessionId, direction: Direction) -> String {
    format!("{PREFIX}:{session}:{}", direction.as_str())
}

/// A button press on a paged message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub session_id: SessionId,
    pub direction: Direction,
    pub actor_id: String,
}

impl NavigationEvent {
    /// Decode a control payload. Anything that is not a navigation control
    /// yields `None`.
    pub fn decode(payload: &str, actor_id: impl Into<String>) -> Option<Self> {
        let mut parts = payload.split(':');
        if parts.next()? != PREFIX {
            return None;
        }
        let session = parts.next().filter(|s| !s.is_empty())?;
        let direction = Direction::parse(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            session_id: SessionId::from(session),
            direction,
            actor_id: actor_id.into(),
        })
    }
}
