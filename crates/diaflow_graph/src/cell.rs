// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cell identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a cell (node or edge).
///
/// Caller-supplied ids are kept verbatim; ids created with [`CellId::new`]
/// are random UUIDs. Identifiers survive layout round trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(String);

impl CellId {
    /// Create a new random cell ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for CellId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CellId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_id_is_verbatim() {
        let id = CellId::from("node-1");
        assert_eq!(id.as_str(), "node-1");
        assert_eq!(id.to_string(), "node-1");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(CellId::new(), CellId::new());
    }
}
