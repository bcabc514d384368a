use std::fmt;

use uuid::Uuid;

/// Opaque handle to one paging session.
///
/// Only the textual form leaves the store; it is embedded in button custom ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source of fresh session ids.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> SessionId;
}

/// 128-bit random ids (UUID v4, hyphenless hex).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> SessionId {
        SessionId(Uuid::new_v4().simple().to_string())
    }
}
