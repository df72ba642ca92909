//! Theme preference workflows.

use crate::domain::app_state::AppState;
use crate::domain::types::Theme;
use crate::forms::preferences::ThemeForm;
use crate::repository::ThemeStore;
use crate::services::{ServiceError, ServiceResult};

/// Stored theme, or the default when nothing was saved yet.
pub fn load_theme<S>(store: &S) -> ServiceResult<Theme>
where
    S: ThemeStore + ?Sized,
{
    let theme = store.load_theme().map_err(|err| {
        log::error!("Failed to load theme preference: {err}");
        err
    })?;
    Ok(theme.unwrap_or_default())
}

/// Validates and persists a new theme preference.
pub fn save_theme<S>(store: &S, form: ThemeForm) -> ServiceResult<Theme>
where
    S: ThemeStore + ?Sized,
{
    let theme = Theme::try_from(form).map_err(|err| {
        log::error!("Failed to validate theme form: {err}");
        ServiceError::from(err)
    })?;

    store.save_theme(theme).map_err(|err| {
        log::error!("Failed to save theme preference: {err}");
        err
    })?;

    Ok(theme)
}

/// Application state seeded with the stored theme.
pub fn load_app_state<S>(store: &S) -> ServiceResult<AppState>
where
    S: ThemeStore + ?Sized,
{
    load_theme(store).map(AppState::with_theme)
}

/// Persists the theme from `form`, then applies it to `state`.
///
/// `state` is left untouched when validation or storage fails.
pub fn switch_theme<S>(store: &S, state: &mut AppState, form: ThemeForm) -> ServiceResult<Theme>
where
    S: ThemeStore + ?Sized,
{
    let theme = save_theme(store, form)?;
    state.switch_theme(theme);
    Ok(theme)
}
