//! HTTP fetcher for the random-user demo API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::domain::client::{Client, ClientPage};
use crate::models::random_user::{RandomUserResponse, normalize_record};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader};

pub const DEFAULT_SOURCE_URL: &str = "https://randomuser.me/api/";
pub const DEFAULT_SEED: &str = "crm-demo";

#[derive(Clone, Debug)]
pub struct RandomUserRepository {
    http: HttpClient,
    base_url: String,
    seed: String,
}

impl RandomUserRepository {
    pub fn new(
        base_url: impl Into<String>,
        seed: impl Into<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            seed: seed.into(),
        })
    }

    async fn request(&self, query: &ClientListQuery) -> RepositoryResult<RandomUserResponse> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("page", query.page.get().to_string()),
                ("results", query.page_size.get().to_string()),
                ("seed", self.seed.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RepositoryError::RemoteError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let parsed: RandomUserResponse = serde_json::from_slice(&body)?;

        if let Some(message) = parsed.error {
            return Err(RepositoryError::RemoteError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed)
    }
}

/// Normalizes every raw record, dropping the ones that cannot be converted.
fn normalize_results(raw: Vec<serde_json::Value>, limit: usize) -> Vec<Client> {
    raw.into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(index, value)| match normalize_record(value) {
            Ok(client) => Some(client),
            Err(err) => {
                log::warn!("Dropping record {index} of fetched page: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ClientReader for RandomUserRepository {
    async fn fetch_clients(&self, query: &ClientListQuery) -> RepositoryResult<ClientPage> {
        log::debug!(
            "Fetching clients page {} (size {}) from {}",
            query.page,
            query.page_size,
            self.base_url
        );

        let response = self.request(query).await.map_err(|err| {
            log::error!("Failed to fetch clients page {}: {err}", query.page);
            err
        })?;

        let limit = query.page_size.as_usize();
        let fetched = response.results.len().min(limit);
        let clients = normalize_results(response.results, limit);
        let total = response.info.map(|info| info.results).unwrap_or(fetched);

        let mut page = ClientPage::new(clients, total);
        page.fetched = fetched;
        if let Some(term) = &query.search {
            page.retain_keyword(term.as_str());
        }

        Ok(page)
    }
}
