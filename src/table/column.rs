use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::table::TableError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    Avatar,
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
    City,
    Country,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 8] = [
        ColumnKey::Avatar,
        ColumnKey::FirstName,
        ColumnKey::LastName,
        ColumnKey::Email,
        ColumnKey::Phone,
        ColumnKey::Status,
        ColumnKey::City,
        ColumnKey::Country,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Avatar => "avatar",
            ColumnKey::FirstName => "first_name",
            ColumnKey::LastName => "last_name",
            ColumnKey::Email => "email",
            ColumnKey::Phone => "phone",
            ColumnKey::Status => "status",
            ColumnKey::City => "city",
            ColumnKey::Country => "country",
        }
    }

    pub const fn header(self) -> &'static str {
        match self {
            ColumnKey::Avatar => "Avatar",
            ColumnKey::FirstName => "First Name",
            ColumnKey::LastName => "Last Name",
            ColumnKey::Email => "Email",
            ColumnKey::Phone => "Phone",
            ColumnKey::Status => "Status",
            ColumnKey::City => "City",
            ColumnKey::Country => "Country",
        }
    }

    /// Cell value of this column for `client`.
    pub fn value(self, client: &Client) -> &str {
        match self {
            ColumnKey::Avatar => client.picture.thumbnail.as_str(),
            ColumnKey::FirstName => client.name.first.as_str(),
            ColumnKey::LastName => client.name.last.as_str(),
            ColumnKey::Email => client.email.as_str(),
            ColumnKey::Phone => client.phone.as_str(),
            ColumnKey::Status => client.status.as_str(),
            ColumnKey::City => client.location.city.as_str(),
            ColumnKey::Country => client.location.country.as_str(),
        }
    }
}

impl Display for ColumnKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TableError::UnknownColumn(wanted.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: ColumnKey,
    pub header: &'static str,
    pub sortable: bool,
    pub filterable: bool,
    pub visible: bool,
}

impl ColumnDef {
    pub fn new(key: ColumnKey) -> Self {
        Self {
            key,
            header: key.header(),
            sortable: true,
            filterable: true,
            visible: true,
        }
    }

    /// The avatar column shows a picture and never takes part in sorting or filtering.
    pub fn avatar() -> Self {
        Self {
            sortable: false,
            filterable: false,
            ..Self::new(ColumnKey::Avatar)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Columns of the client table: the listing set first, extra contact columns hidden.
pub fn default_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::avatar(),
        ColumnDef::new(ColumnKey::FirstName),
        ColumnDef::new(ColumnKey::LastName),
        ColumnDef::new(ColumnKey::Email),
        ColumnDef::new(ColumnKey::Status),
        ColumnDef::new(ColumnKey::Phone).hidden(),
        ColumnDef::new(ColumnKey::City).hidden(),
        ColumnDef::new(ColumnKey::Country).hidden(),
    ]
}
