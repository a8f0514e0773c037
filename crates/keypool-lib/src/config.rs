//! Bindings configuration — TOML-based, platform-aware paths.
//!
//! A bindings file names each hotkey and holds its combination string:
//!
//! ```toml
//! [bindings]
//! toggle = "Ctrl+Shift+M"
//! capture = "Win+F9"
//! ```
//!
//! Names are resolved in sorted order, so two loads of the same file always
//! register in the same sequence — with last-writer-wins displacement, load
//! order is observable.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::combo::KeyCombination;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# Keypool bindings — changes made outside the app may be overwritten.\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingsConfig {
    /// Named bindings: binding name → combination string ("Ctrl+Shift+M").
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        BindingsConfig {
            bindings: BTreeMap::from([("toggle".into(), "Ctrl+Shift+M".into())]),
        }
    }
}

/// Validation errors that [`BindingsConfig::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A binding's combination string could not be parsed.
    InvalidCombo { name: String, reason: String },
    /// Two bindings encode to the same combination — one would silently
    /// displace the other on registration.
    DuplicateCombo {
        name: String,
        other: String,
        combo: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCombo { name, reason } => {
                write!(f, "Invalid binding \"{name}\": {reason}")
            }
            ValidationError::DuplicateCombo { name, other, combo } => {
                write!(f, "Binding \"{name}\" duplicates \"{other}\" ({combo})")
            }
        }
    }
}

impl BindingsConfig {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join("Keypool"))
        }
        #[cfg(not(windows))]
        {
            dirs::config_dir().map(|p| p.join("keypool"))
        }
    }

    /// Full path to the config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from the default path, returning the config and any parse
    /// warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load config from an arbitrary path, returning the config and any
    /// parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Save config to an arbitrary path atomically (write to temp file, then
    /// rename). A header comment is prepended to warn that manual edits may
    /// be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Validate every binding, collecting all errors.
    ///
    /// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all
    /// problems found: unparsable combinations and bindings that encode to
    /// the same combination.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen: HashMap<u64, &str> = HashMap::new();

        for (name, text) in &self.bindings {
            match text.parse::<KeyCombination>() {
                Ok(combo) => {
                    if let Some(other) = seen.get(&combo.encode()) {
                        errors.push(ValidationError::DuplicateCombo {
                            name: name.clone(),
                            other: (*other).to_string(),
                            combo: combo.to_string(),
                        });
                    } else {
                        seen.insert(combo.encode(), name.as_str());
                    }
                }
                Err(e) => errors.push(ValidationError::InvalidCombo {
                    name: name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Parse every binding into `(name, combination)` pairs in name order.
    ///
    /// Invalid entries are skipped; a warning per skipped entry is returned
    /// alongside the parsed pairs.
    pub fn resolve(&self) -> (Vec<(String, KeyCombination)>, Vec<String>) {
        let mut resolved = Vec::new();
        let mut warnings = Vec::new();
        for (name, text) in &self.bindings {
            match text.parse::<KeyCombination>() {
                Ok(combo) => resolved.push((name.clone(), combo)),
                Err(e) => warnings.push(format!("skipping binding \"{name}\" (\"{text}\"): {e}")),
            }
        }
        (resolved, warnings)
    }
}
