//! Reaction emoji → target language resolution
//!
//! A reaction names a language either through a flag emoji (`flag-jp`) or
//! through a bare key that is itself in the table (`fr`). Anything else is not
//! a translation request.

mod table;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

pub use table::DEFAULT_LANGUAGES;

use crate::{Error, Result};

/// Prefix Slack uses for country/region flag emoji
const FLAG_PREFIX: &str = "flag-";

/// Immutable emoji key → ISO 639-1 lookup
///
/// Cheap to clone; the entries are shared.
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    entries: Arc<HashMap<String, String>>,
}

/// Overlay file schema: `[languages] key = "code"`
#[derive(Debug, Default, Deserialize)]
struct LanguageMapFile {
    #[serde(default)]
    languages: HashMap<String, String>,
}

impl LanguageMap {
    /// Build a map from explicit entries
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Arc::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// The table shipped with the crate
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(DEFAULT_LANGUAGES.iter().copied())
    }

    /// Return a new map with `overrides` layered on top of this one
    #[must_use]
    pub fn with_overrides(&self, overrides: HashMap<String, String>) -> Self {
        let mut entries = (*self.entries).clone();
        entries.extend(overrides);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Load the built-in table overlaid with a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load_overlay(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read language map {}: {e}",
                path.display()
            ))
        })?;
        let file: LanguageMapFile = toml::from_str(&content)?;

        tracing::info!(
            path = %path.display(),
            entries = file.languages.len(),
            "loaded language map overlay"
        );

        Ok(Self::builtin().with_overrides(file.languages))
    }

    /// Look a key up directly
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of keys in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a reaction emoji name to a target language code
    ///
    /// `flag-<token>` is looked up by `<token>`; any other name is looked up
    /// as-is. Returns `None` when the key is not in the map.
    #[must_use]
    pub fn resolve(&self, emoji_name: &str) -> Option<&str> {
        self.get(lookup_key(emoji_name))
    }
}

/// The table key a reaction name is looked up under
#[must_use]
pub fn lookup_key(emoji_name: &str) -> &str {
    emoji_name.strip_prefix(FLAG_PREFIX).unwrap_or(emoji_name)
}
