//! Wire model of the random-user API and its normalization into [`Client`].
//!
//! Every field of the raw record is optional at the serde level so that a
//! missing required field surfaces as [`RepositoryError::MalformedRecord`]
//! naming the field, while a structurally broken record surfaces as
//! [`RepositoryError::TransformError`].

use serde::Deserialize;
use serde_json::Value;

use crate::domain::client::{Client, ClientName, Location, Picture};
use crate::domain::types::ClientStatus;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub struct RandomUserResponse {
    /// Raw records, normalized one by one so a bad record cannot sink the page.
    #[serde(default)]
    pub results: Vec<Value>,
    pub info: Option<RandomUserInfo>,
    /// Set by the service instead of `results` when it rejects a request.
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserInfo {
    pub seed: Option<String>,
    pub results: usize,
    pub page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLogin {
    pub uuid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawName {
    pub first: Option<String>,
    pub last: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLocation {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPicture {
    pub thumbnail: Option<String>,
    pub large: Option<String>,
}

/// Activity information, either a `status` string or an `active` flag.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawActivity {
    Flag(bool),
    Label(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawUser {
    pub login: Option<RawLogin>,
    pub name: Option<RawName>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<RawLocation>,
    pub picture: Option<RawPicture>,
    pub status: Option<RawActivity>,
    pub active: Option<bool>,
}

fn required(value: Option<String>, field: &'static str) -> RepositoryResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(RepositoryError::MalformedRecord(field))
}

fn optional(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl RawUser {
    /// Status from the record when it carries one, otherwise derived from `id`.
    fn status(&self, id: &str) -> ClientStatus {
        let explicit = match (&self.status, self.active) {
            (Some(RawActivity::Flag(flag)), _) => Some(ClientStatus::from(*flag)),
            (Some(RawActivity::Label(label)), _) => label.parse().ok(),
            (None, Some(flag)) => Some(ClientStatus::from(flag)),
            (None, None) => None,
        };
        explicit.unwrap_or_else(|| ClientStatus::derive_from_identity(id))
    }
}

impl TryFrom<RawUser> for Client {
    type Error = RepositoryError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = required(raw.login.as_ref().and_then(|l| l.uuid.clone()), "login.uuid")?;
        let status = raw.status(&id);

        let name = raw.name.unwrap_or_default();
        let first = required(name.first, "name.first")?;
        let last = required(name.last, "name.last")?;
        let email = required(raw.email, "email")?;

        let location = raw.location.unwrap_or_default();
        let picture = raw.picture.unwrap_or_default();

        Ok(Client {
            id,
            name: ClientName { first, last },
            email,
            phone: optional(raw.phone),
            status,
            location: Location {
                city: optional(location.city),
                country: optional(location.country),
            },
            picture: Picture {
                thumbnail: optional(picture.thumbnail),
                large: optional(picture.large),
            },
        })
    }
}

/// Normalizes one raw JSON record.
pub fn normalize_record(value: Value) -> RepositoryResult<Client> {
    let raw: RawUser = serde_json::from_value(value)
        .map_err(|e| RepositoryError::TransformError(e.to_string()))?;
    Client::try_from(raw)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "gender": "female",
            "name": { "title": "Ms", "first": "Léa", "last": "Martin" },
            "location": { "city": "Nantes", "country": "France", "postcode": 44000 },
            "email": "lea.martin@example.com",
            "login": { "uuid": "7a0eed16-9430-4d68-901f-c0d4c1c3bf00", "username": "bluecat" },
            "phone": "02-62-35-18-98",
            "picture": {
                "large": "https://randomuser.me/api/portraits/women/88.jpg",
                "medium": "https://randomuser.me/api/portraits/med/women/88.jpg",
                "thumbnail": "https://randomuser.me/api/portraits/thumb/women/88.jpg"
            }
        })
    }

    #[test]
    fn normalizes_full_record() {
        let client = normalize_record(sample()).expect("valid record");

        assert_eq!(client.id, "7a0eed16-9430-4d68-901f-c0d4c1c3bf00");
        assert_eq!(client.name.first, "Léa");
        assert_eq!(client.name.last, "Martin");
        assert_eq!(client.email, "lea.martin@example.com");
        assert_eq!(client.phone, "02-62-35-18-98");
        assert_eq!(client.location.city, "Nantes");
        assert_eq!(client.location.country, "France");
        assert_eq!(
            client.picture.thumbnail,
            "https://randomuser.me/api/portraits/thumb/women/88.jpg"
        );
        assert_eq!(
            client.status,
            ClientStatus::derive_from_identity("7a0eed16-9430-4d68-901f-c0d4c1c3bf00")
        );
    }

    #[test]
    fn normalization_is_repeatable() {
        let a = normalize_record(sample()).unwrap();
        let b = normalize_record(sample()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_activity_wins_over_derivation() {
        let mut flagged = sample();
        flagged["active"] = json!(false);
        assert_eq!(
            normalize_record(flagged).unwrap().status,
            ClientStatus::Inactive
        );

        let mut labelled = sample();
        labelled["status"] = json!("Active");
        assert_eq!(
            normalize_record(labelled).unwrap().status,
            ClientStatus::Active
        );
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut no_id = sample();
        no_id["login"] = json!({ "username": "bluecat" });
        assert!(matches!(
            normalize_record(no_id),
            Err(RepositoryError::MalformedRecord("login.uuid"))
        ));

        let mut blank_email = sample();
        blank_email["email"] = json!("   ");
        assert!(matches!(
            normalize_record(blank_email),
            Err(RepositoryError::MalformedRecord("email"))
        ));

        let mut no_last = sample();
        no_last["name"] = json!({ "first": "Léa" });
        assert!(matches!(
            normalize_record(no_last),
            Err(RepositoryError::MalformedRecord("name.last"))
        ));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let record = json!({
            "login": { "uuid": "u-1" },
            "name": { "first": "A", "last": "B" },
            "email": "a@b.test"
        });
        let client = normalize_record(record).unwrap();
        assert_eq!(client.phone, "");
        assert_eq!(client.location.city, "");
        assert_eq!(client.picture.large, "");
    }

    #[test]
    fn wrongly_typed_record_is_a_transform_error() {
        let record = json!({ "login": { "uuid": 42 }, "email": "x@y.test" });
        assert!(matches!(
            normalize_record(record),
            Err(RepositoryError::TransformError(_))
        ));
        assert!(matches!(
            normalize_record(json!("not an object")),
            Err(RepositoryError::TransformError(_))
        ));
    }
}
