//! Use-case API over a migrated catalog connection.
//!
//! # Responsibility
//! - Expose one function per service operation with stable envelopes.
//! - Turn request shapes into entity records (ids become references).
//!
//! # Invariants
//! - Functions never panic; every failure becomes an `ApiResponse`.
//! - Author and publisher calls share one generic path keyed by
//!   [`NamedEntity`].

use crate::response::{error_response, ApiResponse, STATUS_CREATED, STATUS_OK};
use catalog_core::{
    Author, Book, BookService, EntityId, NamedEntity, NamedEntityService, Publisher,
    ServiceResult, SqliteBookRepository, SqliteNamedRepository,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Create/update payload for authors and publishers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntityRequest {
    pub name: Option<String>,
}

impl NamedEntityRequest {
    fn into_entity<T: NamedEntity>(self) -> T {
        let mut entity = T::default();
        entity.set_name(self.name);
        entity
    }
}

/// Create/update payload for books.
///
/// Omitted fields are written as absent on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: Option<String>,
    /// Unix epoch milliseconds.
    pub publication_date: Option<i64>,
    pub author_id: Option<EntityId>,
    pub publisher_id: Option<EntityId>,
}

impl BookRequest {
    fn into_book(self) -> Book {
        Book {
            id: None,
            title: self.title,
            publication_date: self.publication_date,
            author: self.author_id.map(Author::reference),
            publisher: self.publisher_id.map(Publisher::reference),
        }
    }
}

type NamedService<'conn, T> = NamedEntityService<SqliteNamedRepository<'conn, T>, T>;

/// Creates an author or publisher. `201` with the stored record.
pub fn create_named<T>(conn: &Connection, request: NamedEntityRequest) -> ApiResponse
where
    T: NamedEntity + Serialize,
{
    let entity = request.into_entity::<T>();
    respond(
        STATUS_CREATED,
        with_named::<T, _>(conn, |service| service.create(&entity)),
    )
}

pub fn list_named<T>(conn: &Connection) -> ApiResponse
where
    T: NamedEntity + Serialize,
{
    respond(STATUS_OK, with_named::<T, _>(conn, |service| service.list()))
}

pub fn get_named<T>(conn: &Connection, id: EntityId) -> ApiResponse
where
    T: NamedEntity + Serialize,
{
    respond(
        STATUS_OK,
        with_named::<T, _>(conn, |service| service.get_by_id(id)),
    )
}

pub fn update_named<T>(conn: &Connection, id: EntityId, request: NamedEntityRequest) -> ApiResponse
where
    T: NamedEntity + Serialize,
{
    let patch = request.into_entity::<T>();
    respond(
        STATUS_OK,
        with_named::<T, _>(conn, |service| service.update(id, &patch)),
    )
}

/// Deletes an author or publisher. `204` with an empty body.
pub fn delete_named<T>(conn: &Connection, id: EntityId) -> ApiResponse
where
    T: NamedEntity,
{
    respond_empty(with_named::<T, _>(conn, |service| service.delete(id)))
}

/// Books referencing the author or publisher `id`.
pub fn named_books<T>(conn: &Connection, id: EntityId) -> ApiResponse
where
    T: NamedEntity,
{
    let result = SqliteBookRepository::try_new(conn)
        .map_err(Into::into)
        .and_then(|books| with_named::<T, _>(conn, |service| service.books(id, &books)));
    respond(STATUS_OK, result)
}

pub fn create_book(conn: &Connection, request: BookRequest) -> ApiResponse {
    let book = request.into_book();
    respond(
        STATUS_CREATED,
        with_books(conn, |service| service.create(&book)),
    )
}

pub fn list_books(conn: &Connection) -> ApiResponse {
    respond(STATUS_OK, with_books(conn, |service| service.list()))
}

pub fn get_book(conn: &Connection, id: EntityId) -> ApiResponse {
    respond(STATUS_OK, with_books(conn, |service| service.get_by_id(id)))
}

pub fn update_book(conn: &Connection, id: EntityId, request: BookRequest) -> ApiResponse {
    let patch = request.into_book();
    respond(
        STATUS_OK,
        with_books(conn, |service| service.update(id, &patch)),
    )
}

pub fn delete_book(conn: &Connection, id: EntityId) -> ApiResponse {
    respond_empty(with_books(conn, |service| service.delete(id)))
}

pub fn search_books(conn: &Connection, term: Option<&str>) -> ApiResponse {
    respond(STATUS_OK, with_books(conn, |service| service.search(term)))
}

pub fn books_sorted_by_title(conn: &Connection) -> ApiResponse {
    respond(STATUS_OK, with_books(conn, |service| service.sort_by_title()))
}

pub fn books_sorted_by_publication_date(conn: &Connection) -> ApiResponse {
    respond(
        STATUS_OK,
        with_books(conn, |service| service.sort_by_publication_date()),
    )
}

/// Author report lines as a JSON array of strings.
pub fn author_report(conn: &Connection) -> ApiResponse {
    respond(
        STATUS_OK,
        with_books(conn, |service| service.generate_author_report()),
    )
}

fn with_named<'conn, T, R>(
    conn: &'conn Connection,
    operation: impl FnOnce(&NamedService<'conn, T>) -> ServiceResult<R>,
) -> ServiceResult<R>
where
    T: NamedEntity,
{
    let repo = SqliteNamedRepository::<T>::try_new(conn)?;
    operation(&NamedEntityService::new(repo))
}

fn with_books<'conn, R>(
    conn: &'conn Connection,
    operation: impl FnOnce(&BookService<SqliteBookRepository<'conn>>) -> ServiceResult<R>,
) -> ServiceResult<R> {
    let repo = SqliteBookRepository::try_new(conn)?;
    operation(&BookService::new(repo))
}

fn respond<T: Serialize>(status: u16, result: ServiceResult<T>) -> ApiResponse {
    match result {
        Ok(value) => ApiResponse::json(status, &value),
        Err(err) => error_response(&err),
    }
}

fn respond_empty(result: ServiceResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        author_report, create_book, create_named, delete_named, get_book, get_named,
        list_named, named_books, search_books, update_book, BookRequest, NamedEntityRequest,
    };
    use catalog_core::db::open_db_in_memory;
    use catalog_core::{Author, Book, Publisher};
    use rusqlite::Connection;

    fn named(name: &str) -> NamedEntityRequest {
        NamedEntityRequest {
            name: Some(name.to_string()),
        }
    }

    fn created_id(body: &str) -> i64 {
        let value: serde_json::Value = serde_json::from_str(body).expect("json body");
        value["id"].as_i64().expect("id in body")
    }

    fn seed_author(conn: &Connection, name: &str) -> i64 {
        let response = create_named::<Author>(conn, named(name));
        assert_eq!(response.status, 201, "{}", response.body);
        created_id(&response.body)
    }

    #[test]
    fn author_lifecycle_maps_statuses() {
        let conn = open_db_in_memory().unwrap();
        let id = seed_author(&conn, "Nikhitha");

        let duplicate = create_named::<Author>(&conn, named("Nikhitha"));
        assert_eq!(duplicate.status, 409);
        assert_eq!(duplicate.body, "Author with this name already exists");

        let fetched = get_named::<Author>(&conn, id);
        assert_eq!(fetched.status, 200);
        let author: Author = serde_json::from_str(&fetched.body).unwrap();
        assert_eq!(author.name.as_deref(), Some("Nikhitha"));

        assert_eq!(delete_named::<Author>(&conn, id).status, 204);
        let missing = get_named::<Author>(&conn, id);
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, format!("Author not found with id {id}"));
    }

    #[test]
    fn publisher_list_is_json_array() {
        let conn = open_db_in_memory().unwrap();
        create_named::<Publisher>(&conn, named("Orbit"));
        create_named::<Publisher>(&conn, named("Penguin"));

        let response = list_named::<Publisher>(&conn);
        assert_eq!(response.status, 200);
        let publishers: Vec<Publisher> = serde_json::from_str(&response.body).unwrap();
        assert_eq!(publishers.len(), 2);
    }

    #[test]
    fn book_requests_link_references_by_id() {
        let conn = open_db_in_memory().unwrap();
        let author_id = seed_author(&conn, "Joshua Bloch");

        let response = create_book(
            &conn,
            BookRequest {
                title: Some("Effective Java".to_string()),
                author_id: Some(author_id),
                ..BookRequest::default()
            },
        );
        assert_eq!(response.status, 201, "{}", response.body);
        let book: Book = serde_json::from_str(&response.body).unwrap();
        assert_eq!(book.author_name(), Some("Joshua Bloch"));

        let by_author = named_books::<Author>(&conn, author_id);
        let books: Vec<Book> = serde_json::from_str(&by_author.body).unwrap();
        assert_eq!(books, vec![book]);
    }

    #[test]
    fn invalid_book_input_is_bad_request() {
        let conn = open_db_in_memory().unwrap();

        let response = create_book(&conn, BookRequest::default());
        assert_eq!(response.status, 400);
        assert_eq!(response.body, "Book title is required");

        let search = search_books(&conn, Some(""));
        assert_eq!(search.status, 400);
        assert_eq!(search.body, "Search term cannot be empty");
    }

    #[test]
    fn update_missing_book_is_not_found() {
        let conn = open_db_in_memory().unwrap();
        let response = update_book(
            &conn,
            5,
            BookRequest {
                title: Some("New Title".to_string()),
                ..BookRequest::default()
            },
        );
        assert_eq!(response.status, 404);
        assert_eq!(get_book(&conn, 5).status, 404);
    }

    #[test]
    fn report_failure_is_internal_error() {
        let conn = open_db_in_memory().unwrap();
        let created = create_book(
            &conn,
            BookRequest {
                title: Some("No Author".to_string()),
                ..BookRequest::default()
            },
        );
        let id = created_id(&created.body);

        let response = author_report(&conn);
        assert_eq!(response.status, 500);
        assert_eq!(
            response.body,
            format!("An internal error occurred: book {id} has no author name")
        );
    }

    #[test]
    fn unmigrated_connection_is_internal_error() {
        let conn = Connection::open_in_memory().unwrap();
        let response = list_named::<Author>(&conn);
        assert_eq!(response.status, 500);
        assert!(response.body.starts_with("An internal error occurred:"));
    }
}
