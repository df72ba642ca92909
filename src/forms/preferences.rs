//! Form for changing the theme preference.

use serde::Deserialize;

use crate::domain::types::Theme;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub theme: String,
}

impl TryFrom<ThemeForm> for Theme {
    type Error = FormError;

    fn try_from(form: ThemeForm) -> Result<Self, Self::Error> {
        form.theme
            .parse()
            .map_err(|_| FormError::InvalidTheme(form.theme.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_themes() {
        let form = ThemeForm {
            theme: " Dark ".to_string(),
        };
        assert_eq!(Theme::try_from(form).unwrap(), Theme::Dark);
    }

    #[test]
    fn rejects_unknown_theme() {
        let form = ThemeForm {
            theme: "sepia".to_string(),
        };
        assert!(matches!(
            Theme::try_from(form),
            Err(FormError::InvalidTheme(name)) if name == "sepia"
        ));
    }
}
