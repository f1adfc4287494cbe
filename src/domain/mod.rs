//! Domain types with strong typing.
//!
//! The newtype wrappers here keep anime identifiers from being mixed up with
//! user identifiers or raw integers coming off the wire.

pub mod role;

pub use role::{Role, RoleParseError};

use std::fmt;

/// Unique identifier for an Anime row.
///
/// # Examples
///
/// ```rust
/// use anime_api::domain::AnimeId;
///
/// let id = AnimeId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimeId(i64);

impl AnimeId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AnimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AnimeId> for i64 {
    fn from(id: AnimeId) -> Self {
        id.0
    }
}

impl From<i64> for AnimeId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anime_id_conversions() {
        let id = AnimeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
        assert_eq!(AnimeId::from(42), id);
    }
}
