//! Indexed Taxonomy Snapshot: a read-only, fully identified copy of the category tree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::taxonomy::ids::{allocate, resolve, EntityId, EntityKind};

// ────────────────────────────────────────────────────────────────────────────
// Collaborator input (ids optional)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyCategory {
    #[serde(default, alias = "numId")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<TaxonomySkill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomySkill {
    #[serde(default, alias = "numId")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub competencies: Vec<TaxonomyCompetency>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyCompetency {
    #[serde(default, alias = "numId")]
    pub id: Option<i64>,
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Indexed nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: EntityId,
    pub name: String,
    pub competencies: Vec<Competency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competency {
    pub id: EntityId,
    pub name: String,
}

impl Category {
    pub fn skill(&self, id: EntityId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }
}

impl Skill {
    pub fn competency(&self, id: EntityId) -> Option<&Competency> {
        self.competencies.iter().find(|c| c.id == id)
    }
}

impl From<&Category> for TaxonomyCategory {
    fn from(category: &Category) -> Self {
        TaxonomyCategory {
            id: Some(category.id.0),
            name: category.name.clone(),
            skills: category
                .skills
                .iter()
                .map(|s| TaxonomySkill {
                    id: Some(s.id.0),
                    name: s.name.clone(),
                    competencies: s
                        .competencies
                        .iter()
                        .map(|c| TaxonomyCompetency {
                            id: Some(c.id.0),
                            name: c.name.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot
// ────────────────────────────────────────────────────────────────────────────

/// Immutable root of the indexed hierarchy. Built once per pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    categories: Vec<Category>,
}

/// Running per-kind ordinals for the depth-first walk, plus duplicate tracking.
///
/// `reserved` holds the synthetic ids the input already carries (echoed from an earlier
/// stage). A freshly minted id skips over them so it can never alias an echoed node.
#[derive(Default)]
struct Indexer {
    next_category: usize,
    next_skill: usize,
    next_competency: usize,
    reserved: HashSet<(EntityKind, EntityId)>,
    seen: HashSet<(EntityKind, EntityId)>,
}

impl Indexer {
    fn new(raw: &[TaxonomyCategory]) -> Self {
        let mut reserved = HashSet::new();
        let mut reserve = |persisted: Option<i64>, kind: EntityKind| {
            if let Some(id) = persisted.map(EntityId).filter(|id| id.is_synthetic()) {
                reserved.insert((kind, id));
            }
        };
        for rc in raw {
            reserve(rc.id, EntityKind::Category);
            for rs in &rc.skills {
                reserve(rs.id, EntityKind::Skill);
                for rk in &rs.competencies {
                    reserve(rk.id, EntityKind::Competency);
                }
            }
        }
        Indexer {
            reserved,
            ..Indexer::default()
        }
    }

    fn assign(&mut self, persisted: Option<i64>, kind: EntityKind) -> EntityId {
        let counter = match kind {
            EntityKind::Category => &mut self.next_category,
            EntityKind::Skill => &mut self.next_skill,
            EntityKind::Competency => &mut self.next_competency,
        };
        let mut id = resolve(persisted, *counter, kind);
        *counter += 1;

        if persisted.is_none() {
            while self.reserved.contains(&(kind, id)) || self.seen.contains(&(kind, id)) {
                debug!("Synthetic {:?} id {} already taken; advancing", kind, id);
                id = allocate(*counter, kind);
                *counter += 1;
            }
        }

        if !self.seen.insert((kind, id)) {
            warn!("Duplicate {:?} id {} in taxonomy; first occurrence wins on lookup", kind, id);
        }
        id
    }
}

impl Snapshot {
    /// Indexes the collaborator's hierarchy. Every node missing a persisted id gets a
    /// synthetic one keyed by its ordinal among nodes of the same kind.
    pub fn build(raw: &[TaxonomyCategory]) -> Self {
        let mut indexer = Indexer::new(raw);

        let categories: Vec<Category> = raw
            .iter()
            .map(|rc| {
                let id = indexer.assign(rc.id, EntityKind::Category);
                let skills = rc
                    .skills
                    .iter()
                    .map(|rs| {
                        let id = indexer.assign(rs.id, EntityKind::Skill);
                        let competencies = rs
                            .competencies
                            .iter()
                            .map(|rk| Competency {
                                id: indexer.assign(rk.id, EntityKind::Competency),
                                name: rk.name.trim().to_string(),
                            })
                            .collect();
                        Skill {
                            id,
                            name: rs.name.trim().to_string(),
                            competencies,
                        }
                    })
                    .collect();
                Category {
                    id,
                    name: rc.name.trim().to_string(),
                    skills,
                }
            })
            .collect();

        let snapshot = Snapshot { categories };
        debug!(
            "Indexed taxonomy: {} categories, {} skills, {} competencies",
            snapshot.categories.len(),
            snapshot.skill_count(),
            snapshot.competency_count()
        );
        snapshot
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: EntityId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    pub fn competency_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.skills)
            .map(|s| s.competencies.len())
            .sum()
    }

    /// Compact indexed rendering for prompts. Every node carries its `numId` inline.
    pub fn to_prompt_json(&self) -> String {
        let tree: Vec<_> = self
            .categories
            .iter()
            .map(|c| {
                json!({
                    "numId": c.id,
                    "name": c.name,
                    "skills": c.skills.iter().map(|s| json!({
                        "numId": s.id,
                        "name": s.name,
                        "competencies": s.competencies.iter().map(|k| json!({
                            "numId": k.id,
                            "name": k.name,
                        })).collect::<Vec<_>>(),
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        serde_json::Value::Array(tree).to_string()
    }
}
