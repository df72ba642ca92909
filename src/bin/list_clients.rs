//! Prints one page of clients as a plain-text table.
//!
//! Usage: `list_clients [page] [page_size] [search]`

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;

use client_roster::domain::client::Client;
use client_roster::domain::types::{PageNumber, PageSize};
use client_roster::models::config::load_server_config;
use client_roster::repository::ClientListQuery;
use client_roster::services::session::ClientListSession;
use client_roster::table::column::{ColumnDef, ColumnKey, default_columns};

fn parse_args() -> Result<ClientListQuery, String> {
    let mut args = env::args().skip(1);
    let page = match args.next() {
        Some(raw) => {
            let page: u32 = raw
                .parse()
                .map_err(|_| format!("page must be a number, got {raw:?}"))?;
            PageNumber::new(page).map_err(|e| e.to_string())?
        }
        None => PageNumber::default(),
    };
    let page_size = match args.next() {
        Some(raw) => {
            let size: u32 = raw
                .parse()
                .map_err(|_| format!("page_size must be a number, got {raw:?}"))?;
            PageSize::new(size).map_err(|e| e.to_string())?
        }
        None => PageSize::default(),
    };
    let search = args.next().unwrap_or_default();
    Ok(ClientListQuery::new(page, page_size).search(search))
}

fn cell(column: ColumnKey, client: &Client) -> String {
    match column {
        ColumnKey::Avatar => client.name.initials(),
        _ => column.value(client).to_string(),
    }
}

fn render(columns: &[ColumnDef], rows: &[Client]) -> String {
    let columns: Vec<&ColumnDef> = columns.iter().filter(|c| c.visible).collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|row| cell(c.key, row).chars().count())
                .chain([c.header.chars().count()])
                .max()
                .unwrap_or_default()
        })
        .collect();

    let line = |values: Vec<String>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(columns.iter().map(|c| c.header.to_string()).collect())];
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    out.extend(
        rows.iter()
            .map(|row| line(columns.iter().map(|c| cell(c.key, row)).collect())),
    );
    out.join("\n")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let query = match parse_args() {
        Ok(query) => query,
        Err(err) => {
            eprintln!("{err}\nusage: list_clients [page] [page_size] [search]");
            std::process::exit(2);
        }
    };

    let server_config = match load_server_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    let cache = match client_roster::build_cache(&server_config) {
        Ok(cache) => Arc::new(cache),
        Err(err) => {
            log::error!("Failed to build random-user client: {err}");
            std::process::exit(1);
        }
    };

    let session = ClientListSession::with_query(cache, query);
    if let Err(err) = session.load().await {
        log::error!("Failed to list clients: {err}");
        std::process::exit(1);
    }

    let rows = session.visible_rows();
    let query = session.query();
    println!("{}", render(&default_columns(), &rows));
    println!(
        "\npage {} (size {}), {} shown, {} total",
        query.page,
        query.page_size,
        rows.len(),
        session.total().unwrap_or_default()
    );
}
