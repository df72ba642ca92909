use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{PageNumber, PageSize};
use crate::forms::FormError;
use crate::repository::ClientListQuery;
use crate::table::column::ColumnKey;
use crate::table::sort::SortSpec;

#[derive(Debug, Default, Deserialize, Validate)]
/// Query string of the client listing endpoint.
pub struct ClientsQueryForm {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Keyword applied by the fetcher across every field of the page.
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// Table filter across the visible columns.
    #[validate(length(max = 100))]
    pub filter: Option<String>,
    /// `column` or `-column`.
    pub sort: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 100))]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
}

/// Validated listing request.
#[derive(Debug)]
pub struct ClientListPayload {
    pub query: ClientListQuery,
    pub global_filter: Option<String>,
    pub column_filters: Vec<(ColumnKey, String)>,
}

impl ClientsQueryForm {
    fn column_filters(&self) -> Vec<(ColumnKey, String)> {
        [
            (ColumnKey::FirstName, &self.first_name),
            (ColumnKey::LastName, &self.last_name),
            (ColumnKey::Email, &self.email),
            (ColumnKey::Status, &self.status),
            (ColumnKey::Phone, &self.phone),
            (ColumnKey::City, &self.city),
            (ColumnKey::Country, &self.country),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }
}

impl TryFrom<ClientsQueryForm> for ClientListPayload {
    type Error = FormError;

    fn try_from(form: ClientsQueryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let page = match form.page {
            Some(page) => PageNumber::new(page).map_err(|e| FormError::InvalidPage(e.to_string()))?,
            None => PageNumber::default(),
        };
        let page_size = match form.page_size {
            Some(size) => {
                PageSize::new(size).map_err(|e| FormError::InvalidPageSize(e.to_string()))?
            }
            None => PageSize::default(),
        };
        let sort = form
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<SortSpec>)
            .transpose()
            .map_err(|e| FormError::InvalidSort(e.to_string()))?;

        let column_filters = form.column_filters();
        let query = ClientListQuery::new(page, page_size)
            .search(form.search.unwrap_or_default())
            .sort(sort);

        Ok(Self {
            query,
            global_filter: form.filter,
            column_filters,
        })
    }
}
