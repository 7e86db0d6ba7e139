// Taxonomy: category → skill → competency, addressed by one signed identifier space.

pub mod ids;
pub mod snapshot;

pub use ids::EntityId;
pub use snapshot::{Category, Competency, Skill, Snapshot, TaxonomyCategory};
