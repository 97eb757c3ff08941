//! The `source` subcommand: inspect the merged catalog and edit the
//! `[sources]` table of `.refmd.toml` without disturbing the rest of
//! the file.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::CONFIG_FILE;
use crate::error::Error;

// ── CLI commands ──────────────────────────────────────────────────────

/// Add a source's base URL to the config file.
///
/// Built-in names are allowed here: the config entry overrides the
/// compiled-in base URL.
///
/// # Errors
///
/// Returns `Error::SourceExists` if the config already declares the name,
/// or errors from config editing.
pub fn cmd_add(name: &str, base_url: &str) -> Result<(), Error> {
    let root = PathBuf::from(".");
    add_to_config(&root, name, base_url)?;
    println!("Added source: {name} -> {base_url}");
    Ok(())
}

/// List all catalog sources with their base URLs and target counts,
/// sorted alphabetically.
///
/// # Errors
///
/// Returns errors from config loading.
pub fn cmd_list() -> Result<(), Error> {
    let root = PathBuf::from(".");
    let catalog = Catalog::load(&root)?;

    for (name, source) in catalog.sources() {
        let count = source.targets.len();
        println!("{name} -> {} ({count} targets)", source.base_url);
    }

    Ok(())
}

/// Remove a source from the config file. Built-in sources cannot be
/// removed; they are compiled in.
///
/// # Errors
///
/// Returns `Error::BuiltinSource` for compiled-in names,
/// `Error::UnknownSource` if the config doesn't declare the name,
/// or errors from config editing.
pub fn cmd_remove(name: &str) -> Result<(), Error> {
    let root = PathBuf::from(".");
    remove_from_config(&root, name)?;
    println!("Removed source: {name}");
    Ok(())
}

// ── Config file editing ───────────────────────────────────────────────

/// Add a `[sources.<name>]` entry to `.refmd.toml`.
/// Creates the file and the `[sources]` table if they don't exist.
///
/// # Errors
///
/// Returns `Error::SourceExists` if the config already declares the name,
/// `Error::ParseFailed` if the config can't be parsed,
/// or `Error::Io` if writing fails.
fn add_to_config(root: &Path, name: &str, base_url: &str) -> Result<(), Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    let already_declared = doc
        .get("sources")
        .and_then(toml_edit::Item::as_table)
        .is_some_and(|table| return table.contains_key(name));
    if already_declared {
        return Err(Error::SourceExists {
            name: name.to_string(),
        });
    }

    if !doc.contains_key("sources") {
        let mut table = toml_edit::Table::new();
        table.set_implicit(true);
        doc["sources"] = toml_edit::Item::Table(table);
    }

    let mut entry = toml_edit::Table::new();
    entry["base-url"] = toml_edit::value(base_url);
    doc["sources"][name] = toml_edit::Item::Table(entry);

    std::fs::write(&config_path, doc.to_string())?;
    Ok(())
}

/// Parse a `.refmd.toml` into a format-preserving document.
/// Returns an empty document if the file doesn't exist.
///
/// # Errors
///
/// Returns `Error::Io` on read failure or `Error::ParseFailed` on parse failure.
fn read_config_doc(root: &Path) -> Result<(PathBuf, toml_edit::DocumentMut), Error> {
    let config_path = root.join(CONFIG_FILE);
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(Error::Io(e)),
    };

    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        Error::ParseFailed {
            file: config_path.clone(),
            reason: e.to_string(),
        }
    })?;

    Ok((config_path, doc))
}

/// Remove a `[sources.<name>]` entry from `.refmd.toml`.
///
/// # Errors
///
/// Returns `Error::BuiltinSource` for compiled-in names not declared in
/// config, or `Error::UnknownSource` if the name isn't found at all.
fn remove_from_config(root: &Path, name: &str) -> Result<(), Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    let declared = doc
        .get_mut("sources")
        .and_then(toml_edit::Item::as_table_mut)
        .and_then(|table| return table.remove(name));

    if declared.is_none() {
        if Catalog::is_builtin(name) {
            return Err(Error::BuiltinSource {
                name: name.to_string(),
            });
        }
        return Err(Error::UnknownSource {
            name: name.to_string(),
        });
    }

    std::fs::write(&config_path, doc.to_string())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::{add_to_config, remove_from_config};
    use crate::config::Config;
    use crate::error::Error;

    #[test]
    fn add_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "wiki", "https://example.com/wiki/").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let wiki = config.sources.get("wiki").unwrap();
        assert_eq!(wiki.base_url.as_deref(), Some("https://example.com/wiki/"));
    }

    #[test]
    fn add_refuses_duplicate_declaration() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "wiki", "https://example.com/wiki/").unwrap();
        let err = add_to_config(dir.path(), "wiki", "https://example.com/other/").unwrap_err();
        assert!(matches!(err, Error::SourceExists { .. }));
    }

    #[test]
    fn add_preserves_unrelated_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".refmd.toml");
        std::fs::write(&path, "# managed by hand\n").unwrap();

        add_to_config(dir.path(), "wiki", "https://example.com/wiki/").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# managed by hand"));
        assert!(content.contains("base-url = \"https://example.com/wiki/\""));
    }

    #[test]
    fn remove_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        add_to_config(dir.path(), "wiki", "https://example.com/wiki/").unwrap();
        remove_from_config(dir.path(), "wiki").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.sources.is_empty());
    }

    #[test]
    fn remove_unknown_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = remove_from_config(dir.path(), "nope").unwrap_err();
        assert!(matches!(err, Error::UnknownSource { .. }));
    }

    #[test]
    fn remove_builtin_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = remove_from_config(dir.path(), "charmcraft").unwrap_err();
        assert!(matches!(err, Error::BuiltinSource { .. }));
    }
}
