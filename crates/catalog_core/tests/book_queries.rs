use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Author, AuthorService, Book, BookService, EntityStore, Publisher, PublisherService,
    ServiceError, SqliteAuthorRepository, SqliteBookRepository, SqlitePublisherRepository,
};
use rusqlite::Connection;

fn titles(books: &[Book]) -> Vec<&str> {
    books
        .iter()
        .filter_map(|book| book.title.as_deref())
        .collect()
}

fn seed_catalog(conn: &Connection) {
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(conn).unwrap());
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(conn).unwrap());
    let books = BookService::new(SqliteBookRepository::try_new(conn).unwrap());

    let nikhitha = authors.create(&Author::new("Nikhitha")).unwrap();
    let john = authors.create(&Author::new("John Doe")).unwrap();
    let geetha = publishers.create(&Publisher::new("Geetha Publishers")).unwrap();
    let orbit = publishers.create(&Publisher::new("Orbit")).unwrap();

    books
        .create(
            &Book::new("Java Fundamentals")
                .with_publication_date(3_000)
                .with_author(nikhitha.clone())
                .with_publisher(geetha.clone()),
        )
        .unwrap();
    books
        .create(
            &Book::new("effective Rust")
                .with_publication_date(1_000)
                .with_author(john)
                .with_publisher(orbit),
        )
        .unwrap();
    books
        .create(
            &Book::new("Algorithms")
                .with_publication_date(2_000)
                .with_author(nikhitha.clone())
                .with_publisher(geetha),
        )
        .unwrap();
    books
        .create(
            &Book::new("Zen of Java")
                .with_publication_date(1_500)
                .with_author(nikhitha),
        )
        .unwrap();
}

#[test]
fn search_matches_title_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service.create(&Book::new("Effective Java")).unwrap();

    let found = service.search(Some("effective")).unwrap();
    assert_eq!(titles(&found), vec!["Effective Java"]);

    assert!(service.search(Some("nomatch")).unwrap().is_empty());
}

#[test]
fn search_matches_author_and_publisher_names() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let by_author = service.search(Some("JOHN")).unwrap();
    assert_eq!(titles(&by_author), vec!["effective Rust"]);

    let by_publisher = service.search(Some("geetha")).unwrap();
    assert_eq!(titles(&by_publisher), vec!["Java Fundamentals", "Algorithms"]);

    let by_title = service.search(Some("java")).unwrap();
    assert_eq!(titles(&by_title), vec!["Java Fundamentals", "Zen of Java"]);
}

#[test]
fn search_skips_books_without_references() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service.create(&Book::new("Standalone")).unwrap();

    assert!(service.search(Some("orbit")).unwrap().is_empty());
}

#[test]
fn search_rejects_empty_or_absent_term() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let empty = service.search(Some("")).unwrap_err();
    assert!(matches!(empty, ServiceError::InvalidInput(_)));
    assert_eq!(empty.message(), "Search term cannot be empty");

    let absent = service.search(None).unwrap_err();
    assert!(matches!(absent, ServiceError::InvalidInput(_)));
}

#[test]
fn sort_by_title_is_case_sensitive_lexicographic() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let sorted = service.sort_by_title().unwrap();
    assert_eq!(
        titles(&sorted),
        vec![
            "Algorithms",
            "Java Fundamentals",
            "Zen of Java",
            "effective Rust"
        ]
    );
}

#[test]
fn sort_by_publication_date_is_ascending() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let sorted = service.sort_by_publication_date().unwrap();
    let dates: Vec<_> = sorted
        .iter()
        .filter_map(|book| book.publication_date)
        .collect();
    assert_eq!(dates, vec![1_000, 1_500, 2_000, 3_000]);
}

#[test]
fn sort_by_publication_date_fails_on_missing_date() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service
        .create(&Book::new("Dated").with_publication_date(10))
        .unwrap();
    let undated = service.create(&Book::new("Undated")).unwrap();

    let err = service.sort_by_publication_date().unwrap_err();
    assert!(matches!(err, ServiceError::Unexpected { .. }));
    assert_eq!(
        err.message(),
        format!("book {} has no publication date", undated.id.unwrap())
    );
}

#[test]
fn sort_by_title_fails_on_book_stored_without_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let untitled = repo.save(&Book::default()).unwrap();
    let service = BookService::new(repo);

    let err = service.sort_by_title().unwrap_err();
    assert!(matches!(err, ServiceError::Unexpected { .. }));
    assert_eq!(
        err.message(),
        format!("book {} has no title", untitled.id.unwrap())
    );
}

#[test]
fn author_report_counts_books_per_author_in_name_order() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let report = service.generate_author_report().unwrap();
    assert_eq!(
        report,
        vec!["John Doe: 1 books".to_string(), "Nikhitha: 3 books".to_string()]
    );
}

#[test]
fn author_report_is_empty_for_empty_catalog() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    assert!(service.generate_author_report().unwrap().is_empty());
}

#[test]
fn author_report_fails_on_book_without_author() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let anonymous = service.create(&Book::new("Anonymous Tales")).unwrap();

    let err = service.generate_author_report().unwrap_err();
    assert!(matches!(err, ServiceError::Unexpected { .. }));
    assert_eq!(
        err.message(),
        format!("book {} has no author name", anonymous.id.unwrap())
    );
}
