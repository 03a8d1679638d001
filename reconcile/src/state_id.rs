//! Composite identifiers.
//!
//! Parts are joined with [`DELIMITER`] and no escaping. A member or column
//! that itself contains the delimiter produces an identifier that no longer
//! parses back to the same parts; building one logs a warning.

use tracing::warn;

pub const DELIMITER: char = ':';

/// Joins `parts` in order. Any empty part yields the empty identifier.
pub fn build_state_id(parts: &[&str]) -> String {
    if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return String::new();
    }

    if parts.iter().any(|p| p.contains(DELIMITER)) {
        warn!(
            parts = ?parts,
            "Composite identifier part contains the delimiter and will not round-trip"
        );
    }

    parts.join(&DELIMITER.to_string())
}

/// Splits an identifier into its parts. The empty string and strings without
/// a delimiter have no parts.
pub fn parse_state_id(id: &str) -> Vec<&str> {
    if id.is_empty() || !id.contains(DELIMITER) {
        return Vec::new();
    }
    id.split(DELIMITER).collect()
}

fn non_empty_parts(id: &str) -> Option<Vec<&str>> {
    let parts = parse_state_id(id);
    (!parts.iter().any(|p| p.is_empty())).then_some(parts)
}

/// The identity of one member policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyKey {
    pub object_id: String,
    pub member: String,
    pub column: Option<String>
}

impl PolicyKey {
    pub fn pair(object_id: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            member: member.into(),
            column: None
        }
    }

    pub fn triple(
        object_id: impl Into<String>,
        member: impl Into<String>,
        column: impl Into<String>
    ) -> Self {
        Self {
            object_id: object_id.into(),
            member: member.into(),
            column: Some(column.into())
        }
    }

    /// `<objectId>:<member>`; any other shape, or an empty part, is `None`.
    pub fn parse_pair(id: &str) -> Option<Self> {
        match non_empty_parts(id)?.as_slice() {
            [object_id, member] => Some(Self::pair(*object_id, *member)),
            _ => None
        }
    }

    /// `<objectId>:<member>:<column>`; any other shape, or an empty part, is
    /// `None`.
    pub fn parse_triple(id: &str) -> Option<Self> {
        match non_empty_parts(id)?.as_slice() {
            [object_id, member, column] => Some(Self::triple(*object_id, *member, *column)),
            _ => None
        }
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn to_state_id(&self) -> String {
        match &self.column {
            Some(column) => build_state_id(&[&self.object_id, &self.member, column]),
            None => build_state_id(&[&self.object_id, &self.member])
        }
    }
}
