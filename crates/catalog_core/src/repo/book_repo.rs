//! Book store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist books with optional author/publisher foreign keys.
//! - Load books joined with the names of their referenced entities.
//! - Serve the author/publisher -> books inverse views at query time.
//!
//! # Invariants
//! - Only reference ids are written; names always come from the joined rows.
//! - A reference to a missing author/publisher is rejected by the foreign
//!   key and surfaces as `RepoError::ConstraintViolation`.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::publisher::Publisher;
use crate::model::{BookRelation, EntityId};
use crate::repo::store::{ensure_table_ready, EntityStore, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    b.id AS id,
    b.title AS title,
    b.publication_date AS publication_date,
    b.author_id AS author_id,
    a.name AS author_name,
    b.publisher_id AS publisher_id,
    p.name AS publisher_name
FROM books b
LEFT JOIN authors a ON a.id = b.author_id
LEFT JOIN publishers p ON p.id = b.publisher_id";

/// Book persistence including the derived inverse views.
pub trait BookStore: EntityStore<Book> {
    /// Books whose `relation` foreign key points at `id`, in store order.
    fn find_by_relation(&self, relation: BookRelation, id: EntityId) -> RepoResult<Vec<Book>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "books",
            &[
                "id",
                "title",
                "publication_date",
                "author_id",
                "publisher_id",
            ],
        )?;
        Ok(Self { conn })
    }

    fn query_books(&self, sql: &str, id: Option<EntityId>) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match id {
            Some(id) => stmt.query([id])?,
            None => stmt.query([])?,
        };
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn load_saved(&self, id: EntityId) -> RepoResult<Book> {
        self.find_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("book {id} missing from read-back after save"))
        })
    }
}

impl EntityStore<Book> for SqliteBookRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL} ORDER BY b.id ASC;"), None)
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE b.id = ?1;"),
                [id],
                |row| parse_book_row(row),
            )
            .optional()?;
        Ok(book)
    }

    fn save(&self, book: &Book) -> RepoResult<Book> {
        let author_id = reference_id(book.author.as_ref().map(|author| author.id), "author")?;
        let publisher_id = reference_id(
            book.publisher.as_ref().map(|publisher| publisher.id),
            "publisher",
        )?;

        let id = match book.id {
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE books
                     SET
                        title = ?1,
                        publication_date = ?2,
                        author_id = ?3,
                        publisher_id = ?4
                     WHERE id = ?5;",
                    params![
                        book.title.as_deref(),
                        book.publication_date,
                        author_id,
                        publisher_id,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound { entity: "Book", id });
                }
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO books (
                        title,
                        publication_date,
                        author_id,
                        publisher_id
                    ) VALUES (?1, ?2, ?3, ?4);",
                    params![
                        book.title.as_deref(),
                        book.publication_date,
                        author_id,
                        publisher_id,
                    ],
                )?;
                self.conn.last_insert_rowid()
            }
        };

        self.load_saved(id)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn exists_by_id(&self, id: EntityId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl BookStore for SqliteBookRepository<'_> {
    fn find_by_relation(&self, relation: BookRelation, id: EntityId) -> RepoResult<Vec<Book>> {
        let column = match relation {
            BookRelation::Author => "b.author_id",
            BookRelation::Publisher => "b.publisher_id",
        };
        self.query_books(
            &format!("{BOOK_SELECT_SQL} WHERE {column} = ?1 ORDER BY b.id ASC;"),
            Some(id),
        )
    }
}

/// Resolves a reference to the id written into the book row.
///
/// An unsaved reference (no id) cannot be linked, since the store never
/// cascades inserts from books to authors or publishers.
fn reference_id(
    reference: Option<Option<EntityId>>,
    kind: &'static str,
) -> RepoResult<Option<EntityId>> {
    match reference {
        None => Ok(None),
        Some(Some(id)) => Ok(Some(id)),
        Some(None) => Err(RepoError::InvalidData(format!(
            "book {kind} reference must be saved before it is linked"
        ))),
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let author = row
        .get::<_, Option<EntityId>>("author_id")?
        .map(|id| -> rusqlite::Result<Author> {
            Ok(Author {
                id: Some(id),
                name: row.get("author_name")?,
            })
        })
        .transpose()?;
    let publisher = row
        .get::<_, Option<EntityId>>("publisher_id")?
        .map(|id| -> rusqlite::Result<Publisher> {
            Ok(Publisher {
                id: Some(id),
                name: row.get("publisher_name")?,
            })
        })
        .transpose()?;

    Ok(Book {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        publication_date: row.get("publication_date")?,
        author,
        publisher,
    })
}
