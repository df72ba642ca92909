//! Application state shared with the presentation layer.
//!
//! Holds the theme preference and the client profile dialog. The fetcher,
//! cache and table engine never see this type.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::Theme;

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ClientDialog {
    pub open: bool,
    pub client: Option<Client>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub client_dialog: ClientDialog,
}

impl AppState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn switch_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Opens the profile dialog for `client`.
    pub fn open_client(&mut self, client: Client) {
        self.client_dialog = ClientDialog {
            open: true,
            client: Some(client),
        };
    }

    /// Closes the dialog, keeping the last client so a close animation can still render it.
    pub fn close_dialog(&mut self) {
        self.client_dialog.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::fixtures::client;
    use crate::domain::types::ClientStatus;

    #[test]
    fn dialog_opens_and_closes() {
        let mut state = AppState::default();
        assert_eq!(state.theme, Theme::System);
        assert!(!state.client_dialog.open);

        state.open_client(client("a1", "Ann", "Lee", ClientStatus::Active));
        assert!(state.client_dialog.open);
        assert_eq!(
            state.client_dialog.client.as_ref().map(|c| c.id.as_str()),
            Some("a1")
        );

        state.close_dialog();
        assert!(!state.client_dialog.open);
        assert!(state.client_dialog.client.is_some());
    }

    #[test]
    fn theme_switch_is_explicit() {
        let mut state = AppState::with_theme(Theme::Light);
        state.switch_theme(Theme::Dark);
        assert_eq!(state.theme, Theme::Dark);
    }
}
