//! Sampling levels
//!
//! DEFAULT and MEDIUM are two names for the same numeric level. Identity,
//! ordering, and hashing all go by level, and name resolution on a shared
//! level returns the first declared name, so `Medium.name()` is "DEFAULT".

use crate::document::DocumentError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Report sampling level requested from the API
#[derive(Debug, Clone, Copy)]
pub enum SamplingLevel {
    Small,
    Default,
    Medium,
    Large,
}

/// Declaration order; drives first-declared-wins name resolution
const MEMBERS: [(SamplingLevel, &str); 4] = [
    (SamplingLevel::Small, "SMALL"),
    (SamplingLevel::Default, "DEFAULT"),
    (SamplingLevel::Medium, "MEDIUM"),
    (SamplingLevel::Large, "LARGE"),
];

impl SamplingLevel {
    /// Numeric level; DEFAULT and MEDIUM share one
    pub fn level(&self) -> u8 {
        match self {
            SamplingLevel::Small => 1,
            SamplingLevel::Default | SamplingLevel::Medium => 2,
            SamplingLevel::Large => 3,
        }
    }

    /// First declared name with this member's level
    pub fn name(&self) -> &'static str {
        MEMBERS
            .iter()
            .find(|(member, _)| member.level() == self.level())
            .map(|(_, name)| *name)
            .unwrap_or("LARGE")
    }

    /// Look a level up by its declared name
    pub fn from_name(name: &str) -> Result<Self, DocumentError> {
        MEMBERS
            .iter()
            .find(|(_, member_name)| *member_name == name)
            .map(|(member, _)| *member)
            .ok_or_else(|| DocumentError::UnknownSamplingLevel {
                name: name.to_string(),
            })
    }
}

impl PartialEq for SamplingLevel {
    fn eq(&self, other: &Self) -> bool {
        self.level() == other.level()
    }
}

impl Eq for SamplingLevel {}

impl Hash for SamplingLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level().hash(state);
    }
}

impl PartialOrd for SamplingLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SamplingLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level().cmp(&other.level())
    }
}

impl fmt::Display for SamplingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_shared_level_name_tie_break() {
        assert_eq!(SamplingLevel::Default.name(), "DEFAULT");
        assert_eq!(SamplingLevel::Medium.name(), "DEFAULT");
        assert_eq!(SamplingLevel::Small.name(), "SMALL");
        assert_eq!(SamplingLevel::Large.name(), "LARGE");
    }

    #[test]
    fn test_equality_by_level() {
        assert_eq!(SamplingLevel::Default, SamplingLevel::Medium);
        assert_ne!(SamplingLevel::Small, SamplingLevel::Large);
    }

    #[test]
    fn test_ordering() {
        assert!(SamplingLevel::Small < SamplingLevel::Default);
        assert!(SamplingLevel::Medium < SamplingLevel::Large);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            SamplingLevel::from_name("MEDIUM").unwrap(),
            SamplingLevel::Default
        );
        assert_matches!(
            SamplingLevel::from_name("HUGE"),
            Err(DocumentError::UnknownSamplingLevel { .. })
        );
    }
}
