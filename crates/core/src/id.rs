//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a draft line.
///
/// Assigned when the row is created and stable until it is removed, so the
/// view layer can address rows without depending on their display position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for LineId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for LineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(LineId::new(), LineId::new());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = LineId::new();
        let parsed: LineId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
