//! Domain aggregates exposed by the listing service layer.

pub mod app_state;
pub mod client;
pub mod types;
