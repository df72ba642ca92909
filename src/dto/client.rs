//! DTO shaped for the client profile dialog.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::ClientStatus;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientProfile {
    pub id: String,
    pub full_name: String,
    /// Avatar fallback when the picture cannot be shown.
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub status: ClientStatus,
    pub location: String,
    pub picture: String,
}

impl From<&Client> for ClientProfile {
    fn from(client: &Client) -> Self {
        let location = [&client.location.city, &client.location.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: client.id.clone(),
            full_name: client.name.full(),
            initials: client.name.initials(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            status: client.status,
            location,
            picture: client.picture.large.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::fixtures::client;

    #[test]
    fn profile_joins_location_parts() {
        let mut c = client("a1", "Ann", "Lee", ClientStatus::Active);
        let profile = ClientProfile::from(&c);
        assert_eq!(profile.full_name, "Ann Lee");
        assert_eq!(profile.initials, "AL");
        assert_eq!(profile.location, "Lyon, France");
        assert_eq!(profile.picture, "https://img.test/large/a1.jpg");

        c.location.city.clear();
        assert_eq!(ClientProfile::from(&c).location, "France");
    }
}
