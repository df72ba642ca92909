#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
use crate::repository::RandomUserRepository;
#[cfg(feature = "server")]
use crate::repository::errors::RepositoryResult;
#[cfg(feature = "server")]
use crate::repository::{CacheOptions, FileThemeStore};
use crate::repository::QueryCache;

pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod table;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Cache over the random-user source shared by the HTTP handlers.
pub type ClientCache = QueryCache<RandomUserRepository>;

/// Builds the random-user reader and wraps it in a cache tuned by `server_config`.
#[cfg(feature = "server")]
pub fn build_cache(server_config: &ServerConfig) -> RepositoryResult<ClientCache> {
    let repo = RandomUserRepository::new(
        server_config.source_url.as_str(),
        server_config.seed.as_str(),
        server_config.request_timeout(),
    )?;

    Ok(QueryCache::with_options(
        repo,
        CacheOptions {
            stale_after: server_config.stale_after(),
            retry_attempts: server_config.retry_attempts,
            gc_after: server_config.gc_after(),
        },
    ))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let cache = build_cache(&server_config).map_err(|e| {
        std::io::Error::other(format!("Failed to build random-user client: {e}"))
    })?;
    let cache = web::Data::new(cache);

    let themes = web::Data::new(FileThemeStore::new(server_config.preferences_path.clone()));

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving clients from {} on {}:{}",
        server_config.source_url,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(cache.clone())
            .app_data(themes.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
