//! Identifier Allocator: one signed identifier space for persisted and unsaved taxonomy nodes.
//!
//! Non-negative ids belong to the storage collaborator. Negative ids are minted here,
//! session-scoped, and partitioned per kind so a category can never alias a skill.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Width of each kind's synthetic range. Indices below this never cross into another kind.
pub const KIND_STRIDE: i64 = 10_000;

/// Identifier of a taxonomy node. `>= 0` persisted, `< 0` synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    pub fn is_synthetic(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three levels of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Skill,
    Competency,
}

impl EntityKind {
    /// Fixed per-kind offset into the negative range.
    pub const fn offset(self) -> i64 {
        match self {
            EntityKind::Category => KIND_STRIDE,
            EntityKind::Skill => 2 * KIND_STRIDE,
            EntityKind::Competency => 3 * KIND_STRIDE,
        }
    }
}

/// Mints the synthetic identifier for the `index`-th node of `kind`.
///
/// Pure: the same `(index, kind)` always yields the same id, and the result is always negative.
pub fn allocate(index: usize, kind: EntityKind) -> EntityId {
    let index = index as i64;
    if index >= KIND_STRIDE {
        warn!(
            "Synthetic index {} for {:?} exceeds kind stride {}; may alias another kind",
            index, kind, KIND_STRIDE
        );
    }
    EntityId(-(index + 1 + kind.offset()))
}

/// Persisted identifiers win; a synthetic one is minted only when none exists.
/// A negative value arriving as "persisted" is a synthetic id from an earlier stage and is kept.
pub fn resolve(persisted: Option<i64>, index: usize, kind: EntityKind) -> EntityId {
    match persisted {
        Some(id) => EntityId(id),
        None => allocate(index, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [EntityKind; 3] = [
        EntityKind::Category,
        EntityKind::Skill,
        EntityKind::Competency,
    ];

    #[test]
    fn test_allocate_is_deterministic() {
        for kind in KINDS {
            for i in [0usize, 1, 7, 9_999] {
                assert_eq!(allocate(i, kind), allocate(i, kind));
            }
        }
    }

    #[test]
    fn test_allocate_is_always_negative() {
        for kind in KINDS {
            assert!(allocate(0, kind).is_synthetic());
            assert!(allocate(9_999, kind).is_synthetic());
        }
    }

    #[test]
    fn test_allocate_formula() {
        assert_eq!(allocate(0, EntityKind::Category), EntityId(-10_001));
        assert_eq!(allocate(0, EntityKind::Skill), EntityId(-20_001));
        assert_eq!(allocate(4, EntityKind::Competency), EntityId(-30_005));
    }

    #[test]
    fn test_kinds_never_collide_for_same_index() {
        for i in 0..KIND_STRIDE as usize {
            let c = allocate(i, EntityKind::Category);
            let s = allocate(i, EntityKind::Skill);
            let k = allocate(i, EntityKind::Competency);
            assert!(c != s && s != k && c != k, "collision at index {i}");
        }
    }

    #[test]
    fn test_kind_ranges_are_disjoint_below_stride() {
        let max = KIND_STRIDE as usize - 1;
        // Category range is (-20_000, -10_000], skill (-30_000, -20_000], competency (-40_000, -30_000]
        assert!(allocate(max, EntityKind::Category) > allocate(0, EntityKind::Skill));
        assert!(allocate(max, EntityKind::Skill) > allocate(0, EntityKind::Competency));
    }

    #[test]
    fn test_resolve_prefers_persisted() {
        assert_eq!(resolve(Some(42), 0, EntityKind::Skill), EntityId(42));
        assert_eq!(resolve(Some(0), 3, EntityKind::Category), EntityId(0));
        assert_eq!(resolve(None, 3, EntityKind::Category), EntityId(-10_004));
    }

    #[test]
    fn test_entity_id_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&EntityId(-30_001)).unwrap(), "-30001");
        let id: EntityId = serde_json::from_str("17").unwrap();
        assert_eq!(id, EntityId(17));
        assert!(!id.is_synthetic());
    }
}
