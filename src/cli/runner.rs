//! CLI runner - executes commands

use crate::api::{BookClubClient, BookQuery};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{sources, BookFilter};
use crate::http::HttpClient;
use crate::types::{Book, Integration, Page};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.build_client()?;

        match &self.cli.command {
            Commands::Books {
                search,
                source,
                since,
            } => {
                let filter = BookFilter {
                    search: search.clone(),
                    source: source.clone(),
                    window: *since,
                };
                self.books(&client, &filter).await
            }
            Commands::Page {
                search,
                integration,
                start_date,
                end_date,
                limit,
                offset,
            } => {
                let query = BookQuery {
                    search: search.clone(),
                    integration: integration.clone(),
                    start_date: *start_date,
                    end_date: *end_date,
                    limit: *limit,
                    offset: *offset,
                };
                self.page(&client, &query).await
            }
            Commands::Book { id } => {
                let book = client.get_book(id).await?;
                self.emit_books(&[&book]);
                Ok(())
            }
            Commands::Search { query } => {
                let books = client.search_books(query).await?;
                let refs: Vec<&Book> = books.iter().collect();
                self.emit_books(&refs);
                Ok(())
            }
            Commands::Sources => self.sources(&client).await,
        }
    }

    /// Resolve configuration layers into a client
    fn build_client(&self) -> Result<BookClubClient> {
        let config = match &self.cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        }
        .with_env()
        .with_base_url(self.cli.base_url.clone());
        config.validate()?;

        info!("Using API at {}", config.api.base_url);
        let http = HttpClient::with_config(config.http_config())?;
        Ok(BookClubClient::with_fetch_config(http, config.fetch_config()))
    }

    async fn books(&self, client: &BookClubClient, filter: &BookFilter) -> Result<()> {
        let collection = client.get_all_books_until(interrupted()).await?;
        let now = Local::now().naive_local();
        let matched = filter.apply(&collection.results, now);

        info!(
            "{} of {} book(s) match, {} (server reports {})",
            matched.len(),
            collection.len(),
            filter.window.label(),
            collection.count
        );
        self.emit_books(&matched);
        Ok(())
    }

    async fn page(&self, client: &BookClubClient, query: &BookQuery) -> Result<()> {
        let page = client.get_books(query).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&page),
            OutputFormat::Pretty => print!("{}", render_page(&page)),
        }
        Ok(())
    }

    async fn sources(&self, client: &BookClubClient) -> Result<()> {
        let (books, integrations) = futures::join!(
            client.get_all_books_until(interrupted()),
            client.get_integrations()
        );
        let books = books?.results;
        let integrations = integrations.unwrap_or_else(|e| {
            warn!("Failed to load integrations: {}", e);
            Vec::new()
        });

        let summary = summarize_sources(&books, &integrations);
        match self.cli.format {
            OutputFormat::Json => {
                for (name, count) in &summary {
                    print_json(&json!({ "name": name, "books": count }));
                }
            }
            OutputFormat::Pretty => {
                for (name, count) in &summary {
                    println!("{name} ({count})");
                }
            }
        }
        Ok(())
    }

    fn emit_books(&self, books: &[&Book]) {
        match self.cli.format {
            OutputFormat::Json => {
                for book in books {
                    print_json(book);
                }
            }
            OutputFormat::Pretty => print!("{}", render_books(books)),
        }
    }
}

/// Completes on Ctrl-C; never completes if the handler cannot be installed
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        futures::future::pending::<()>().await;
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("Failed to serialize output: {}", e),
    }
}

/// Source names with their book counts: sources seen in books first, then
/// registered integrations that have no books
pub fn summarize_sources(books: &[Book], integrations: &[Integration]) -> Vec<(String, usize)> {
    let mut summary: Vec<(String, usize)> = sources(books)
        .into_iter()
        .map(|name| {
            let count = books.iter().filter(|b| b.integration_name == name).count();
            (name, count)
        })
        .collect();

    for integration in integrations {
        if !summary.iter().any(|(name, _)| name == &integration.name) {
            summary.push((integration.name.clone(), 0));
        }
    }
    summary
}

/// Human-readable listing
pub fn render_books(books: &[&Book]) -> String {
    if books.is_empty() {
        return "No books found\nTry adjusting your filters\n".to_string();
    }

    let mut out = String::new();
    for book in books {
        let date = book
            .published_on()
            .map_or_else(|| book.date.clone(), |d| d.format("%b %d, %Y").to_string());
        let _ = writeln!(out, "{}", book.book);
        let _ = writeln!(out, "  by {}", book.author);
        let _ = writeln!(out, "  {} | {}", book.integration_name, date);
        let _ = writeln!(out, "  {}", book.url);
        out.push('\n');
    }
    out
}

fn render_page(page: &Page<Book>) -> String {
    let refs: Vec<&Book> = page.results.iter().collect();
    let mut out = render_books(&refs);
    let _ = writeln!(
        out,
        "{} of {} book(s){}",
        page.results.len(),
        page.count,
        if page.is_last() { "" } else { ", more available" }
    );
    out
}
