//! Core domain logic for the library catalog.
//! This crate owns the entity model, storage adapters and the service-layer
//! rules (validation, conflict translation, derived queries).

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::Author;
pub use model::book::Book;
pub use model::publisher::Publisher;
pub use model::{BookRelation, EntityId, NamedEntity};
pub use repo::book_repo::{BookStore, SqliteBookRepository};
pub use repo::named_repo::{
    SqliteAuthorRepository, SqliteNamedRepository, SqlitePublisherRepository,
};
pub use repo::store::{EntityStore, RepoError, RepoResult};
pub use service::book_service::BookService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::named_service::{AuthorService, NamedEntityService, PublisherService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
