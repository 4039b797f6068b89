use catalog_core::{Author, Book, NamedEntity, Publisher};

#[test]
fn new_records_are_unsaved() {
    let author = Author::new("Nikhitha");
    let publisher = Publisher::new("Geetha Publishers");
    let book = Book::new("Java Essentials");

    assert_eq!(author.id, None);
    assert_eq!(publisher.id, None);
    assert_eq!(book.id, None);
    assert_eq!(book.author, None);
    assert_eq!(book.publisher, None);
    assert_eq!(book.publication_date, None);
}

#[test]
fn has_title_rejects_absent_and_empty_titles() {
    assert!(Book::new("Java Essentials").has_title());
    assert!(!Book::new("").has_title());
    assert!(!Book::default().has_title());
}

#[test]
fn reference_names_are_read_through_book() {
    let book = Book::new("Java Fundamentals")
        .with_author(Author::new("Nikhitha"))
        .with_publisher(Publisher::reference(4));

    assert_eq!(book.author_name(), Some("Nikhitha"));
    assert_eq!(book.publisher_name(), None);
}

#[test]
fn named_entities_expose_labels_for_messages() {
    assert_eq!(Author::LABEL, "Author");
    assert_eq!(Publisher::LABEL, "Publisher");

    let mut publisher = Publisher::from_parts(1, Some("Old".to_string()));
    publisher.set_name(Some("New".to_string()));
    assert_eq!(NamedEntity::name(&publisher), Some("New"));
    assert_eq!(NamedEntity::id(&publisher), Some(1));
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let mut author = Author::new("Joshua Bloch");
    author.id = Some(3);
    let mut book = Book::new("Effective Java")
        .with_publication_date(1_514_764_800_000)
        .with_author(author);
    book.id = Some(9);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["title"], "Effective Java");
    assert_eq!(json["publication_date"], 1_514_764_800_000_i64);
    assert_eq!(json["author"]["id"], 3);
    assert_eq!(json["author"]["name"], "Joshua Bloch");
    assert!(json["publisher"].is_null());

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}
