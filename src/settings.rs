//! Key/value settings injected into the UI layer.
//!
//! The only setting kept today is the colour theme. The calculator
//! itself never touches settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path;

pub const THEME_KEY: &str = "theme";

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Csv(csv::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "settings I/O error: {}", err),
            SettingsError::Csv(err) => write!(f, "malformed settings file: {}", err),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Csv(err) => Some(err),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<csv::Error> for SettingsError {
    fn from(err: csv::Error) -> Self {
        SettingsError::Csv(err)
    }
}

pub trait SettingsProvider {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

#[derive(Debug, Default)]
pub struct MemorySettings(BTreeMap<String, String>);

impl SettingsProvider for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct SettingRecord {
    key: String,
    value: String,
}

/// Settings stored as a two-column `key,value` CSV file.
/// The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct FileSettings {
    path: path::PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettings {
    /// Load settings from `path`. A missing file is an empty set of settings.
    pub fn open<P: Into<path::PathBuf>>(path: P) -> Result<Self, SettingsError> {
        let path = path.into();
        let mut values = BTreeMap::new();

        if path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(&path)?;
            for record in reader.deserialize::<SettingRecord>() {
                let SettingRecord { key, value } = record?;
                values.insert(key, value);
            }
        }

        Ok(Self { path, values })
    }

    fn save(&self) -> Result<(), SettingsError> {
        let file = fs::File::create(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        for (key, value) in self.values.iter() {
            writer.serialize(SettingRecord {
                key: key.clone(),
                value: value.clone(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SettingsProvider for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon offered for switching away from the current theme
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "sun",
            Theme::Light => "moon",
        }
    }

    /// Stored preference, or `system_default` when nothing usable is stored.
    pub fn load<S: SettingsProvider + ?Sized>(settings: &S, system_default: Theme) -> Self {
        match settings.get(THEME_KEY) {
            Some(stored) => Theme::parse(&stored).unwrap_or_else(|| {
                log::warn!("Ignoring unknown stored theme '{}'", stored);
                system_default
            }),
            None => system_default,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flip the theme and persist the new choice.
pub fn toggle_theme<S: SettingsProvider + ?Sized>(
    settings: &mut S,
    current: Theme,
) -> Result<Theme, SettingsError> {
    let new_theme = current.toggled();
    settings.set(THEME_KEY, new_theme.as_str())?;
    Ok(new_theme)
}
