//! Catalog entity model.
//!
//! # Responsibility
//! - Define the Author, Publisher and Book records shared by repositories,
//!   services and the API boundary.
//! - Describe the shape common to name-keyed entities via [`NamedEntity`].
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on creation and is never
//!   reassigned afterwards.
//! - Author/Publisher -> Books is a derived view queried from the book side;
//!   no record here holds a back-reference collection.

pub mod author;
pub mod book;
pub mod publisher;

/// Store-assigned integer identity shared by every catalog entity.
pub type EntityId = i64;

/// Which foreign key on a book points at a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRelation {
    Author,
    Publisher,
}

/// Shape shared by entities identified by an id and an intended-unique name.
///
/// Author and Publisher are served by the same generic repository and
/// service; this trait is the seam between them.
pub trait NamedEntity: Clone + Default {
    /// Human-facing entity label used in service error messages.
    const LABEL: &'static str;
    /// Storage table holding rows of this entity.
    const TABLE: &'static str;
    /// Book foreign key referencing this entity.
    const RELATION: BookRelation;

    /// Rebuilds a record from persisted parts.
    fn from_parts(id: EntityId, name: Option<String>) -> Self;
    fn id(&self) -> Option<EntityId>;
    fn name(&self) -> Option<&str>;
    fn set_name(&mut self, name: Option<String>);
}
