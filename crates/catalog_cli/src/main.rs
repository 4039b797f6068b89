//! `catalog` command-line driver.
//!
//! # Responsibility
//! - Open the catalog database and run one use-case call per invocation.
//! - Print the response body and exit non-zero on any non-2xx status.
//!
//! ```sh
//! catalog --db ./library.sqlite3 author add "Ursula K. Le Guin"
//! catalog book add --title "The Dispossessed" --author-id 1
//! catalog book search guin
//! ```

use catalog_api::api;
use catalog_api::response::STATUS_OK;
use catalog_api::{ApiResponse, BookRequest, NamedEntityRequest};
use catalog_core::db::open_db;
use catalog_core::{Author, CatalogConfig, NamedEntity, Publisher};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Manage a library catalog of authors, publishers and books")]
struct Cli {
    /// SQLite catalog file.
    #[arg(long, env = "CATALOG_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "CATALOG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "CATALOG_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage authors.
    Author {
        #[command(subcommand)]
        action: NamedAction,
    },
    /// Manage publishers.
    Publisher {
        #[command(subcommand)]
        action: NamedAction,
    },
    /// Manage books.
    Book {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Open the catalog and print core linkage info.
    Ping,
}

#[derive(Subcommand, Debug)]
enum NamedAction {
    Add { name: Option<String> },
    List,
    Get { id: i64 },
    Rename { id: i64, name: Option<String> },
    Delete { id: i64 },
    /// Books referencing this entity.
    Books { id: i64 },
}

#[derive(Subcommand, Debug)]
enum BookAction {
    Add(BookFields),
    List,
    Get {
        id: i64,
    },
    /// Overwrites every field; omitted options are cleared.
    Update {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete {
        id: i64,
    },
    /// Case-insensitive match on title, author name or publisher name.
    Search {
        term: Option<String>,
    },
    SortTitle,
    SortDate,
    /// Book counts per author.
    Report,
}

#[derive(Args, Debug)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    /// Unix epoch milliseconds.
    #[arg(long)]
    published: Option<i64>,
    #[arg(long)]
    author_id: Option<i64>,
    #[arg(long)]
    publisher_id: Option<i64>,
}

impl From<BookFields> for BookRequest {
    fn from(fields: BookFields) -> Self {
        Self {
            title: fields.title,
            publication_date: fields.published,
            author_id: fields.author_id,
            publisher_id: fields.publisher_id,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = catalog_core::init_logging(&config.log_level, log_dir) {
            eprintln!("catalog: {err}");
            return ExitCode::FAILURE;
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=cli_run module=cli status=error db_path={} error={err}",
                config.db_path.display()
            );
            eprintln!("catalog: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let response = match cli.command {
        Command::Author { action } => run_named::<Author>(&conn, action),
        Command::Publisher { action } => run_named::<Publisher>(&conn, action),
        Command::Book { action } => run_book(&conn, action),
        Command::Ping => ping(),
    };

    info!(
        "event=cli_run module=cli status={} http_status={}",
        if response.is_success() { "ok" } else { "error" },
        response.status
    );
    report(&response)
}

fn resolve_config(cli: &Cli) -> CatalogConfig {
    CatalogConfig::resolve(cli.db.clone(), cli.log_level.clone(), cli.log_dir.clone())
}

fn run_named<T>(conn: &Connection, action: NamedAction) -> ApiResponse
where
    T: NamedEntity + Serialize,
{
    match action {
        NamedAction::Add { name } => api::create_named::<T>(conn, NamedEntityRequest { name }),
        NamedAction::List => api::list_named::<T>(conn),
        NamedAction::Get { id } => api::get_named::<T>(conn, id),
        NamedAction::Rename { id, name } => {
            api::update_named::<T>(conn, id, NamedEntityRequest { name })
        }
        NamedAction::Delete { id } => api::delete_named::<T>(conn, id),
        NamedAction::Books { id } => api::named_books::<T>(conn, id),
    }
}

fn run_book(conn: &Connection, action: BookAction) -> ApiResponse {
    match action {
        BookAction::Add(fields) => api::create_book(conn, fields.into()),
        BookAction::List => api::list_books(conn),
        BookAction::Get { id } => api::get_book(conn, id),
        BookAction::Update { id, fields } => api::update_book(conn, id, fields.into()),
        BookAction::Delete { id } => api::delete_book(conn, id),
        BookAction::Search { term } => api::search_books(conn, term.as_deref()),
        BookAction::SortTitle => api::books_sorted_by_title(conn),
        BookAction::SortDate => api::books_sorted_by_publication_date(conn),
        BookAction::Report => api::author_report(conn),
    }
}

fn ping() -> ApiResponse {
    ApiResponse {
        status: STATUS_OK,
        body: format!(
            "catalog_core ping={} version={}",
            catalog_core::ping(),
            catalog_core::core_version()
        ),
    }
}

fn report(response: &ApiResponse) -> ExitCode {
    if response.is_success() {
        if !response.body.is_empty() {
            println!("{}", response.body);
        }
        ExitCode::SUCCESS
    } else {
        eprintln!("{} {}", response.status, response.body);
        ExitCode::FAILURE
    }
}
