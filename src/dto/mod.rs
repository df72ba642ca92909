//! Data transfer objects returned by the service layer.

pub mod api;
pub mod client;
