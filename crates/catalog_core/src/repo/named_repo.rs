//! SQLite adapter for name-keyed entities (authors, publishers).
//!
//! # Invariants
//! - Rows are listed in rowid order, which is insertion order.
//! - The `name` column carries a UNIQUE constraint; duplicates surface as
//!   `RepoError::ConstraintViolation`.

use crate::model::author::Author;
use crate::model::publisher::Publisher;
use crate::model::{EntityId, NamedEntity};
use crate::repo::store::{ensure_table_ready, EntityStore, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::marker::PhantomData;

/// SQLite-backed store for any [`NamedEntity`].
pub struct SqliteNamedRepository<'conn, T> {
    conn: &'conn Connection,
    _entity: PhantomData<T>,
}

pub type SqliteAuthorRepository<'conn> = SqliteNamedRepository<'conn, Author>;
pub type SqlitePublisherRepository<'conn> = SqliteNamedRepository<'conn, Publisher>;

impl<'conn, T: NamedEntity> SqliteNamedRepository<'conn, T> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, T::TABLE, &["id", "name"])?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn insert(&self, entity: &T) -> RepoResult<T> {
        self.conn.execute(
            &format!("INSERT INTO {} (name) VALUES (?1);", T::TABLE),
            [entity.name()],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(T::from_parts(id, entity.name().map(str::to_owned)))
    }

    fn overwrite(&self, id: EntityId, entity: &T) -> RepoResult<T> {
        let changed = self.conn.execute(
            &format!("UPDATE {} SET name = ?1 WHERE id = ?2;", T::TABLE),
            params![entity.name(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: T::LABEL,
                id,
            });
        }
        Ok(T::from_parts(id, entity.name().map(str::to_owned)))
    }
}

impl<T: NamedEntity> EntityStore<T> for SqliteNamedRepository<'_, T> {
    fn find_all(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, name FROM {} ORDER BY id ASC;", T::TABLE))?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(parse_named_row(row)?);
        }
        Ok(entities)
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>> {
        let entity = self
            .conn
            .query_row(
                &format!("SELECT id, name FROM {} WHERE id = ?1;", T::TABLE),
                [id],
                |row| parse_named_row(row),
            )
            .optional()?;
        Ok(entity)
    }

    fn save(&self, entity: &T) -> RepoResult<T> {
        match entity.id() {
            Some(id) => self.overwrite(id, entity),
            None => self.insert(entity),
        }
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        self.conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", T::TABLE), [id])?;
        Ok(())
    }

    fn exists_by_id(&self, id: EntityId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", T::TABLE),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_named_row<T: NamedEntity>(row: &Row<'_>) -> rusqlite::Result<T> {
    Ok(T::from_parts(row.get("id")?, row.get("name")?))
}
