//! File-backed theme preference.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::types::Theme;
use crate::repository::ThemeStore;
use crate::repository::errors::RepositoryResult;

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    theme: String,
}

#[derive(Clone, Debug)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the target, unique per write so concurrent saves never share it.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }
}

impl ThemeStore for FileThemeStore {
    fn load_theme(&self) -> RepositoryResult<Option<Theme>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredPreferences = serde_json::from_str(&contents)?;
        Ok(Some(stored.theme.parse::<Theme>()?))
    }

    fn save_theme(&self, theme: Theme) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&StoredPreferences {
            theme: theme.as_str().to_string(),
        })?;
        // readers see either the old file or the new one, never a partial write
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        log::info!("Saved theme preference {theme} to {}", self.path.display());
        Ok(())
    }
}
