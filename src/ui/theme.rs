use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};

/// Two-state colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon class shown on the toggle button
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "fa-sun",
            Theme::Dark => "fa-moon",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Persistence for the theme preference
pub trait ThemeStore: Send + Sync {
    /// Stored preference, `None` when nothing usable is stored
    fn load(&self) -> Option<Theme>;

    fn save(&self, theme: Theme) -> anyhow::Result<()>;

    /// Stored preference or the default (light)
    fn load_or_default(&self) -> Theme {
        self.load().unwrap_or_default()
    }
}

/// In-process store, for tests and embedders without storage
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<String>>,
}

impl MemoryThemeStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Mutex::new(Some(value.to_string())),
        }
    }

    /// Raw stored string
    pub fn raw(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.raw().and_then(|v| v.parse().ok())
    }

    fn save(&self, theme: Theme) -> anyhow::Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store lock poisoned"))?;
        *value = Some(theme.as_str().to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    theme: String,
}

/// JSON file store: `{"theme": "dark"}`
#[derive(Debug, Clone)]
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
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredPreferences = serde_json::from_str(&contents).ok()?;
        stored.theme.parse().ok()
    }

    fn save(&self, theme: Theme) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(&StoredPreferences {
            theme: theme.as_str().to_string(),
        })?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
