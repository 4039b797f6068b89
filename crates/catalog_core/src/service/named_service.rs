//! Use-case service for name-keyed entities (authors, publishers).
//!
//! # Invariants
//! - `create`/`update` perform no field validation; duplicate names are
//!   rejected by storage and reported as `Conflict`.
//! - `update` overwrites only the name.
//! - `delete` checks existence with `exists_by_id` and does not translate
//!   storage failures.

use crate::model::book::Book;
use crate::model::{EntityId, NamedEntity};
use crate::repo::book_repo::BookStore;
use crate::repo::store::EntityStore;
use crate::service::error::{conflict_on_constraint, ServiceError, ServiceResult};
use std::marker::PhantomData;

/// Service facade shared by authors and publishers.
pub struct NamedEntityService<S, T> {
    store: S,
    _entity: PhantomData<T>,
}

pub type AuthorService<S> = NamedEntityService<S, crate::model::author::Author>;
pub type PublisherService<S> = NamedEntityService<S, crate::model::publisher::Publisher>;

impl<S, T> NamedEntityService<S, T>
where
    S: EntityStore<T>,
    T: NamedEntity,
{
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Inserts `entity` as a new record and returns it with its assigned id.
    ///
    /// Any id on `entity` is ignored; ids are only assigned by the store.
    pub fn create(&self, entity: &T) -> ServiceResult<T> {
        let mut fresh = T::default();
        fresh.set_name(entity.name().map(str::to_owned));
        self.store
            .save(&fresh)
            .map_err(|err| conflict_on_constraint(err, &duplicate_name_message::<T>()))
    }

    pub fn list(&self) -> ServiceResult<Vec<T>> {
        Ok(self.store.find_all()?)
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<T> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(T::LABEL, id))
    }

    /// Replaces the name of an existing entity with `patch`'s name.
    pub fn update(&self, id: EntityId, patch: &T) -> ServiceResult<T> {
        let mut entity = self.get_by_id(id)?;
        entity.set_name(patch.name().map(str::to_owned));
        self.store
            .save(&entity)
            .map_err(|err| conflict_on_constraint(err, &duplicate_name_message::<T>()))
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        if !self.store.exists_by_id(id)? {
            return Err(ServiceError::not_found(T::LABEL, id));
        }
        self.store.delete_by_id(id)?;
        Ok(())
    }

    /// Books referencing entity `id`, computed from the book side.
    pub fn books<B: BookStore>(&self, id: EntityId, books: &B) -> ServiceResult<Vec<Book>> {
        if !self.store.exists_by_id(id)? {
            return Err(ServiceError::not_found(T::LABEL, id));
        }
        Ok(books.find_by_relation(T::RELATION, id)?)
    }
}

fn duplicate_name_message<T: NamedEntity>() -> String {
    format!("{} with this name already exists", T::LABEL)
}
