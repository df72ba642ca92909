//! Listing and profile lookups over the query cache.

use crate::domain::client::Client;
use crate::dto::api::ClientsResponse;
use crate::dto::client::ClientProfile;
use crate::forms::clients::{ClientListPayload, ClientsQueryForm};
use crate::pagination::Paginated;
use crate::repository::{ClientReader, QueryCache};
use crate::services::{ServiceError, ServiceResult};
use crate::table::TableEngine;

fn validate(form: ClientsQueryForm) -> ServiceResult<ClientListPayload> {
    ClientListPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate clients query: {err}");
        ServiceError::from(err)
    })
}

/// Returns one page of clients with the table filters and sort applied.
pub async fn list_clients<R>(
    cache: &QueryCache<R>,
    form: ClientsQueryForm,
) -> ServiceResult<ClientsResponse>
where
    R: ClientReader,
{
    let payload = validate(form)?;
    let query = payload.query;

    let mut table = TableEngine::default();
    table.set_sort(query.sort)?;
    if let Some(filter) = &payload.global_filter {
        table.set_global_filter(filter);
    }
    for (key, value) in &payload.column_filters {
        table.set_column_filter(*key, value)?;
    }

    let page = cache.get(&query).await.map_err(|err| {
        log::error!("Failed to load clients page {}: {err}", query.page);
        err
    })?;

    let rows: Vec<Client> = table.rows(&page.clients).into_iter().cloned().collect();
    let listing = Paginated::new(rows, query.page, query.page_size, page.total, page.fetched);

    Ok(ClientsResponse::new(listing, page.fetched_at, query.sort))
}

/// Looks up one client of the requested page for the profile dialog.
pub async fn get_client_profile<R>(
    cache: &QueryCache<R>,
    client_id: &str,
    form: ClientsQueryForm,
) -> ServiceResult<ClientProfile>
where
    R: ClientReader,
{
    let payload = validate(form)?;

    let page = cache.get(&payload.query).await.map_err(|err| {
        log::error!("Failed to load clients page {}: {err}", payload.query.page);
        err
    })?;

    page.find(client_id)
        .map(ClientProfile::from)
        .ok_or(ServiceError::NotFound)
}
