use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ClientStatus;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClientName {
    pub first: String,
    pub last: String,
}

impl ClientName {
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }

    /// First letters of the first and last names, used as an avatar fallback.
    pub fn initials(&self) -> String {
        self.first
            .chars()
            .next()
            .into_iter()
            .chain(self.last.chars().next())
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub city: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Picture {
    pub thumbnail: String,
    pub large: String,
}

/// Normalized client record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    /// Opaque identity taken from the source record's login identifier.
    pub id: String,
    pub name: ClientName,
    pub email: String,
    pub phone: String,
    pub status: ClientStatus,
    pub location: Location,
    pub picture: Picture,
}

impl Client {
    /// Every string-valued field, nested ones included.
    pub fn string_fields(&self) -> [&str; 10] {
        [
            self.id.as_str(),
            self.name.first.as_str(),
            self.name.last.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.status.as_str(),
            self.location.city.as_str(),
            self.location.country.as_str(),
            self.picture.thumbnail.as_str(),
            self.picture.large.as_str(),
        ]
    }

    /// Case-insensitive substring match across [`Client::string_fields`].
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.string_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// One page of clients as reported by the remote source.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ClientPage {
    pub clients: Vec<Client>,
    /// Total count reported by the source; never affected by local filtering.
    pub total: usize,
    /// Records the source delivered for this page before any were dropped or
    /// filtered out. A full page means more may follow.
    pub fetched: usize,
    pub fetched_at: DateTime<Utc>,
}

impl ClientPage {
    pub fn new(clients: Vec<Client>, total: usize) -> Self {
        Self {
            fetched: clients.len(),
            clients,
            total,
            fetched_at: Utc::now(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// Keeps only clients matching `term` in any string field.
    pub fn retain_keyword(&mut self, term: &str) {
        let needle = term.to_lowercase();
        self.clients.retain(|client| client.matches_keyword(&needle));
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn client(id: &str, first: &str, last: &str, status: ClientStatus) -> Client {
        Client {
            id: id.to_string(),
            name: ClientName {
                first: first.to_string(),
                last: last.to_string(),
            },
            email: format!(
                "{}.{}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            phone: "(555) 010-0000".to_string(),
            status,
            location: Location {
                city: "Lyon".to_string(),
                country: "France".to_string(),
            },
            picture: Picture {
                thumbnail: format!("https://img.test/thumb/{id}.jpg"),
                large: format!("https://img.test/large/{id}.jpg"),
            },
        }
    }
}
