//! The reference catalog: built-in base-URL and target tables, merged
//! with any `.refmd.toml` extensions into one lookup structure.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::types::Resolution;

/// Built-in base URLs for each documentation source.
/// `ops` ships no built-in targets, so its lookups fail until config
/// supplies some.
const BASE_URLS: &[(&str, &str)] = &[
    ("charmcraft", "https://documentation.ubuntu.com/charmcraft/en/latest/"),
    ("juju", "https://documentation.ubuntu.com/juju/3.6/"),
    ("ops", "https://documentation.ubuntu.com/ops/latest/"),
];

/// Built-in charmcraft targets as (target, relative path) pairs.
/// The URL fragment is always the target id itself.
const CHARMCRAFT_TARGETS: &[(&str, &str)] = &[
    ("initialise-a-charm", "howto/manage-charms/"),
    ("specify-a-name", "howto/manage-charms/"),
    ("publish-a-resource", "howto/manage-resources/"),
    ("charmcraft-yaml-key-name", "reference/files/charmcraft-yaml-file/"),
    ("charmcraft-yaml-key-actions", "reference/files/charmcraft-yaml-file/"),
    ("charmcraft-yaml-key-config", "reference/files/charmcraft-yaml-file/"),
    ("charmcraft-yaml-key-requires", "reference/files/charmcraft-yaml-file/"),
    ("charmcraft-yaml-key-provides", "reference/files/charmcraft-yaml-file/"),
    ("charmcraft-yaml-key-documentation", "reference/files/charmcraft-yaml-file/"),
];

/// Built-in juju targets as (target, relative path) pairs.
const JUJU_TARGETS: &[(&str, &str)] = &[(
    "command-juju-model-config",
    "reference/juju-cli/list-of-juju-cli-commands/model-config/",
)];

/// The merged set of documentation sources. Constructed once at startup
/// via `Catalog::builtin()` or `Catalog::load()`, never mutated afterwards.
#[derive(Debug)]
pub struct Catalog {
    sources: BTreeMap<String, Source>,
}

/// A named documentation set: its root URL and its known targets.
#[derive(Debug)]
pub struct Source {
    /// Root address the relative paths are joined onto.
    pub base_url: String,
    /// Known anchors within this source, keyed by target id.
    pub targets: BTreeMap<String, Target>,
}

/// A single resolvable anchor within a source.
#[derive(Debug)]
pub struct Target {
    /// Fragment override; the target id itself when absent.
    pub fragment: Option<String>,
    /// Path relative to the source's base URL.
    pub path: String,
}

impl Catalog {
    /// The compiled-in tables only, no config applied.
    pub fn builtin() -> Self {
        let mut sources = BTreeMap::new();
        for (name, base_url) in BASE_URLS {
            sources.insert(
                (*name).to_string(),
                Source {
                    base_url: (*base_url).to_string(),
                    targets: builtin_targets(name),
                },
            );
        }
        return Self { sources };
    }

    /// Whether a source name is one of the compiled-in tables.
    pub fn is_builtin(name: &str) -> bool {
        return BASE_URLS.iter().any(|(builtin, _)| return *builtin == name);
    }

    /// Built-in tables merged with `.refmd.toml` from the given root.
    ///
    /// # Errors
    ///
    /// Returns config loading errors, or `Error::SourceMissingBaseUrl`
    /// for a config source that is neither built in nor carries a base URL.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let config = Config::load(root)?;
        let mut catalog = Self::builtin();
        catalog.apply(config)?;
        return Ok(catalog);
    }

    /// Resolve a `(source, target)` pair to a full URL.
    ///
    /// The URL is `base_url + path + '#' + fragment`, where the fragment
    /// falls back to the target id when no override is recorded.
    pub fn resolve(&self, source: &str, target: &str) -> Resolution {
        let Some(src) = self.sources.get(source) else {
            return Resolution::UnknownSource;
        };
        let Some(entry) = src.targets.get(target) else {
            return Resolution::UnknownTarget;
        };
        let fragment = entry.fragment.as_deref().unwrap_or(target);
        return Resolution::Resolved(format!("{}{}#{fragment}", src.base_url, entry.path));
    }

    /// Iterate sources in name order.
    pub fn sources(&self) -> impl Iterator<Item = (&String, &Source)> {
        return self.sources.iter();
    }

    /// Overlay config extensions onto the built-in tables.
    /// Config entries win on key collision: a user override is explicit intent.
    fn apply(&mut self, config: Config) -> Result<(), Error> {
        for (name, spec) in config.sources {
            match self.sources.get_mut(&name) {
                Some(source) => {
                    if let Some(base_url) = spec.base_url {
                        source.base_url = base_url;
                    }
                    for (target, entry) in spec.targets {
                        source.targets.insert(
                            target,
                            Target {
                                fragment: entry.fragment,
                                path: entry.path,
                            },
                        );
                    }
                },
                None => {
                    let Some(base_url) = spec.base_url else {
                        return Err(Error::SourceMissingBaseUrl { name });
                    };
                    let targets = spec
                        .targets
                        .into_iter()
                        .map(|(target, entry)| {
                            return (
                                target,
                                Target {
                                    fragment: entry.fragment,
                                    path: entry.path,
                                },
                            );
                        })
                        .collect();
                    self.sources.insert(name, Source { base_url, targets });
                },
            }
        }
        return Ok(());
    }
}

/// The built-in target table for a source name. Empty for sources that
/// only carry a base URL.
fn builtin_targets(source: &str) -> BTreeMap<String, Target> {
    let table: &[(&str, &str)] = match source {
        "charmcraft" => CHARMCRAFT_TARGETS,
        "juju" => JUJU_TARGETS,
        _ => &[],
    };
    return table
        .iter()
        .map(|(target, path)| {
            return (
                (*target).to_string(),
                Target {
                    fragment: None,
                    path: (*path).to_string(),
                },
            );
        })
        .collect();
}
