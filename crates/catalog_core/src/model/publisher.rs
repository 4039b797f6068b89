//! Publisher record.

use super::{BookRelation, EntityId, NamedEntity};
use serde::{Deserialize, Serialize};

/// Book publisher. Name uniqueness is enforced by storage, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// `None` until persisted.
    pub id: Option<EntityId>,
    pub name: Option<String>,
}

impl Publisher {
    /// Creates an unsaved publisher with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Creates a reference to an already persisted publisher.
    ///
    /// Only the id is used when a book row stores this reference.
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }
}

impl NamedEntity for Publisher {
    const LABEL: &'static str = "Publisher";
    const TABLE: &'static str = "publishers";
    const RELATION: BookRelation = BookRelation::Publisher;

    fn from_parts(id: EntityId, name: Option<String>) -> Self {
        Self { id: Some(id), name }
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }
}
