//! Competency Identifier Map: the only bridge from model-authored competency names
//! back to caller-known identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assessment::models::CompetencyRef;
use crate::taxonomy::{EntityId, Snapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyIdEntry {
    pub id: EntityId,
    pub category_id: EntityId,
    pub skill_id: EntityId,
    /// Canonical spelling from the taxonomy.
    pub name: String,
}

/// Keyed by normalized (trimmed, lower-cased, single-spaced) competency name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetencyIdMap(BTreeMap<String, CompetencyIdEntry>);

impl CompetencyIdMap {
    /// Walks the snapshot once. When two competencies share a name the first one wins.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut map = BTreeMap::new();
        for category in snapshot.categories() {
            for skill in &category.skills {
                for competency in &skill.competencies {
                    let key = normalize(&competency.name);
                    if key.is_empty() {
                        continue;
                    }
                    if map.contains_key(&key) {
                        debug!(
                            "Competency name '{}' already mapped; keeping first occurrence",
                            competency.name
                        );
                        continue;
                    }
                    map.insert(
                        key,
                        CompetencyIdEntry {
                            id: competency.id,
                            category_id: category.id,
                            skill_id: skill.id,
                            name: competency.name.clone(),
                        },
                    );
                }
            }
        }
        CompetencyIdMap(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CompetencyIdEntry> {
        self.0.values()
    }

    /// Case-insensitive lookup, retrying with common model decorations removed:
    /// a trailing parenthetical, a `Skill:` prefix, or a `Skill - ` prefix.
    pub fn lookup(&self, name: &str) -> Option<&CompetencyIdEntry> {
        let key = normalize(name);
        if let Some(entry) = self.0.get(&key) {
            return Some(entry);
        }

        let without_paren = key
            .rfind(" (")
            .filter(|_| key.ends_with(')'))
            .map(|i| key[..i].trim_end().to_string());
        let after_colon = key.rfind(':').map(|i| key[i + 1..].trim().to_string());
        let after_dash = key.rfind(" - ").map(|i| key[i + 3..].trim().to_string());

        [without_paren, after_colon, after_dash]
            .into_iter()
            .flatten()
            .find_map(|candidate| self.0.get(&candidate))
    }

    /// Resolves a model-authored name. Unresolved names are kept with null identifiers.
    pub fn resolve(&self, name: &str) -> CompetencyRef {
        let cleaned = clean_name(name);
        match self.lookup(&cleaned) {
            Some(entry) => entry.to_ref(),
            None => {
                debug!("Unresolved competency name '{cleaned}'");
                CompetencyRef {
                    id: None,
                    name: cleaned,
                    skill_id: None,
                }
            }
        }
    }
}

impl CompetencyIdEntry {
    pub fn to_ref(&self) -> CompetencyRef {
        CompetencyRef {
            id: Some(self.id),
            name: self.name.clone(),
            skill_id: Some(self.skill_id),
        }
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

const LEADING_NOISE: &[char] = &['-', '•', '*', '_', '`', '"', '\''];
// no '+' here: "C++", "ES6+"
const TRAILING_NOISE: &[char] = &['.', ';', ',', '*', '_', '`', '"', '\''];

/// Strips list bullets, markdown emphasis, quotes, and trailing punctuation.
pub fn clean_name(raw: &str) -> String {
    raw.trim_start_matches(|c: char| c.is_whitespace() || LEADING_NOISE.contains(&c))
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_NOISE.contains(&c))
        .to_string()
}
