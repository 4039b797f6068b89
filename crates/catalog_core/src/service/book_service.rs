//! Book use-case service.
//!
//! # Responsibility
//! - Validate book input before any storage call.
//! - Translate storage constraint violations into `Conflict`.
//! - Serve derived reads: search, sorted listings and the author report.
//!
//! # Invariants
//! - A book without a non-empty title is never written.
//! - `update` overwrites every mutable field; omitted fields become absent.
//! - Derived reads scan the full collection in memory and never panic on
//!   missing keys; they fail with `Unexpected` naming the offending book.

use crate::model::book::Book;
use crate::model::EntityId;
use crate::repo::book_repo::BookStore;
use crate::service::error::{conflict_on_constraint, ServiceError, ServiceResult};
use std::collections::BTreeMap;

const BOOK_LABEL: &str = "Book";
const TITLE_REQUIRED: &str = "Book title is required";
const DUPLICATE_TITLE: &str = "Book with this title already exists";
const STILL_REFERENCED: &str = "Cannot delete book because it is associated with other records";
const EMPTY_SEARCH_TERM: &str = "Search term cannot be empty";

/// Book service facade over a [`BookStore`].
pub struct BookService<S: BookStore> {
    store: S,
}

impl<S: BookStore> BookService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and inserts `book` as a new record. Any id on `book` is ignored.
    pub fn create(&self, book: &Book) -> ServiceResult<Book> {
        ensure_title(book)?;
        let fresh = Book {
            id: None,
            ..book.clone()
        };
        self.store
            .save(&fresh)
            .map_err(|err| conflict_on_constraint(err, DUPLICATE_TITLE))
    }

    pub fn list(&self) -> ServiceResult<Vec<Book>> {
        Ok(self.store.find_all()?)
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<Book> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(BOOK_LABEL, id))
    }

    /// Overwrites title, publication date, author and publisher of book `id`.
    ///
    /// The title is validated before the target is looked up.
    pub fn update(&self, id: EntityId, patch: &Book) -> ServiceResult<Book> {
        ensure_title(patch)?;
        self.get_by_id(id)?;

        let replacement = Book {
            id: Some(id),
            title: patch.title.clone(),
            publication_date: patch.publication_date,
            author: patch.author.clone(),
            publisher: patch.publisher.clone(),
        };
        self.store
            .save(&replacement)
            .map_err(|err| conflict_on_constraint(err, DUPLICATE_TITLE))
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.get_by_id(id)?;
        self.store
            .delete_by_id(id)
            .map_err(|err| conflict_on_constraint(err, STILL_REFERENCED))
    }

    /// Books whose title, author name or publisher name contains `term`,
    /// ignoring case. Store order is preserved.
    pub fn search(&self, term: Option<&str>) -> ServiceResult<Vec<Book>> {
        let needle = match term {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => return Err(ServiceError::InvalidInput(EMPTY_SEARCH_TERM.to_string())),
        };

        let books = self.store.find_all()?;
        Ok(books
            .into_iter()
            .filter(|book| matches_term(book, &needle))
            .collect())
    }

    /// All books ordered by title (byte-wise, case-sensitive).
    pub fn sort_by_title(&self) -> ServiceResult<Vec<Book>> {
        let mut books = self.store.find_all()?;
        if let Some(book) = books.iter().find(|book| book.title.is_none()) {
            return Err(missing_key(book, "title"));
        }
        books.sort_by(|left, right| left.title.cmp(&right.title));
        Ok(books)
    }

    /// All books ordered by ascending publication date.
    pub fn sort_by_publication_date(&self) -> ServiceResult<Vec<Book>> {
        let mut books = self.store.find_all()?;
        if let Some(book) = books.iter().find(|book| book.publication_date.is_none()) {
            return Err(missing_key(book, "publication date"));
        }
        books.sort_by(|left, right| left.publication_date.cmp(&right.publication_date));
        Ok(books)
    }

    /// One `"<name>: <count> books"` line per distinct author, ordered by name.
    pub fn generate_author_report(&self) -> ServiceResult<Vec<String>> {
        let books = self.store.find_all()?;
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for book in &books {
            let name = book
                .author_name()
                .ok_or_else(|| missing_key(book, "author name"))?;
            *counts.entry(name).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(name, count)| format_report_line(name, count))
            .collect())
    }
}

fn ensure_title(book: &Book) -> ServiceResult<()> {
    if book.has_title() {
        Ok(())
    } else {
        Err(ServiceError::InvalidInput(TITLE_REQUIRED.to_string()))
    }
}

fn matches_term(book: &Book, needle: &str) -> bool {
    [book.title.as_deref(), book.author_name(), book.publisher_name()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn missing_key(book: &Book, key: &str) -> ServiceError {
    let id = book
        .id
        .map_or_else(|| "<unsaved>".to_string(), |id| id.to_string());
    ServiceError::unexpected(format!("book {id} has no {key}"))
}

fn format_report_line(name: &str, count: u64) -> String {
    format!("{name}: {count} books")
}
