use crate::error::{validation_error, DashResult, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

/// Name used until the user saves one
pub const DEFAULT_DISPLAY_NAME: &str = "Friend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(validation_error(&format!("unknown theme '{}'", other))),
        }
    }
}

/// The two values kept across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub display_name: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

/// Persisted settings with a single writer and any number of subscribers.
///
/// Every change goes through [`SettingsStore::update`], which writes the file
/// before publishing the new value.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    state_tx: watch::Sender<Settings>,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        };

        let (state_tx, _) = watch::channel(settings);
        Ok(Self {
            path,
            state_tx,
            write_lock: Mutex::new(()),
        })
    }

    /// Current settings
    pub fn current(&self) -> Settings {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every saved change
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.state_tx.subscribe()
    }

    /// Saved display name, or the default greeting name
    pub fn display_name(&self) -> String {
        self.state_tx
            .borrow()
            .display_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }

    pub fn theme(&self) -> Theme {
        self.state_tx.borrow().theme
    }

    /// Apply a change, persist it, then notify subscribers
    pub fn update<F>(&self, change: F) -> DashResult<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Other("Settings lock poisoned".to_string()))?;

        let mut next = self.current();
        change(&mut next);
        self.persist(&next)?;
        self.state_tx.send_replace(next.clone());

        Ok(next)
    }

    pub fn set_display_name(&self, name: &str) -> DashResult<Settings> {
        let name = name.trim();
        if name.is_empty() {
            return Err(validation_error("Display name cannot be empty"));
        }
        info!("Saving display name");
        self.update(|settings| settings.display_name = Some(name.to_string()))
    }

    pub fn set_theme(&self, theme: Theme) -> DashResult<Settings> {
        self.update(|settings| settings.theme = theme)
    }

    pub fn toggle_theme(&self) -> DashResult<Theme> {
        let settings = self.update(|settings| settings.theme = settings.theme.toggled())?;
        Ok(settings.theme)
    }

    fn persist(&self, settings: &Settings) -> DashResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_str = toml::to_string(settings)?;
        fs::write(&self.path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.toml")).unwrap();
        assert_eq!(store.current(), Settings::default());
        assert_eq!(store.display_name(), DEFAULT_DISPLAY_NAME);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_changes_persist_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let store = SettingsStore::load(&path).unwrap();
        store.set_display_name("  Ada ").unwrap();
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);

        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(reloaded.display_name(), "Ada");
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_subscribers_see_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.toml")).unwrap();
        let mut rx = store.subscribe();

        store.set_theme(Theme::Dark).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, Theme::Dark);
    }

    #[test]
    fn test_blank_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.toml")).unwrap();
        assert!(matches!(
            store.set_display_name("   "),
            Err(Error::Validation(_))
        ));
        assert!(!dir.path().join("settings.toml").exists());
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("purple".parse::<Theme>().is_err());
    }
}
