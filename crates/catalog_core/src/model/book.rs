//! Book record.
//!
//! # Invariants
//! - `title` is non-empty for every book persisted through `BookService`.
//!   The record itself does not enforce this so that invalid input can reach
//!   the service and be rejected with a typed error.
//! - `author`/`publisher` are references; only their `id` is written to the
//!   book row. Loaded books carry the referenced names as well.

use super::author::Author;
use super::publisher::Publisher;
use super::EntityId;
use serde::{Deserialize, Serialize};

/// Catalog book with optional author and publisher references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// `None` until persisted.
    pub id: Option<EntityId>,
    pub title: Option<String>,
    /// Unix epoch milliseconds.
    pub publication_date: Option<i64>,
    pub author: Option<Author>,
    pub publisher: Option<Publisher>,
}

impl Book {
    /// Creates an unsaved book with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_publication_date(mut self, epoch_ms: i64) -> Self {
        self.publication_date = Some(epoch_ms);
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Returns whether the title is present and non-empty.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|title| !title.is_empty())
    }

    /// Name of the referenced author, when both are present.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().and_then(|author| author.name.as_deref())
    }

    /// Name of the referenced publisher, when both are present.
    pub fn publisher_name(&self) -> Option<&str> {
        self.publisher
            .as_ref()
            .and_then(|publisher| publisher.name.as_deref())
    }
}
