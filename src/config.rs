use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".refmd.toml";

/// Catalog extensions loaded from `.refmd.toml`.
/// Sources either add whole documentation sets or extend the targets of
/// built-in ones.
pub struct Config {
    /// Declared sources, keyed by source name.
    pub sources: BTreeMap<String, SourceSpec>,
}

/// A source as declared in config. `base-url` may be omitted when the
/// source is built in and only its target table is being extended.
#[derive(serde::Deserialize)]
pub struct SourceSpec {
    /// Root URL for the source, overriding any built-in value.
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
    /// Targets to add to the source's table.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetSpec>,
}

/// A target as declared in config.
#[derive(serde::Deserialize)]
pub struct TargetSpec {
    /// Fragment override; defaults to the target id when omitted.
    pub fragment: Option<String>,
    /// Path relative to the source's base URL.
    pub path: String,
}

/// Raw TOML structure for `.refmd.toml`.
#[derive(serde::Deserialize)]
struct RefmdTomlConfig {
    #[serde(default)]
    sources: BTreeMap<String, SourceSpec>,
}

impl Config {
    /// Load config from `.refmd.toml` in the given root directory.
    /// Returns an empty extension set if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never silently
    /// falls back to built-ins when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::builtins_only_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: RefmdTomlConfig = toml::from_str(&content)?;
        Ok(Self { sources: raw.sources })
    }

    /// Default config that adds nothing to the built-in tables.
    fn builtins_only_by_default() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }
}
