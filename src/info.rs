use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::CONFIG_FILE;

/// Output the comprehensive refmd reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

#[derive(Serialize)]
struct CurrentState {
    config_found: bool,
    sources: Vec<SourceState>,
    version: String,
}

#[derive(Serialize)]
struct SourceState {
    base_url: String,
    builtin: bool,
    name: String,
    targets: usize,
}

fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();

    // A malformed config shouldn't make `info` unusable.
    let catalog = match Catalog::load(root) {
        Ok(c) => c,
        Err(_err) => Catalog::builtin(),
    };

    let sources = catalog
        .sources()
        .map(|(name, source)| {
            return SourceState {
                base_url: source.base_url.clone(),
                builtin: Catalog::is_builtin(name),
                name: name.clone(),
                targets: source.targets.len(),
            };
        })
        .collect();

    CurrentState {
        config_found,
        sources,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    print_markdown_header(&state.version);
    print_markdown_sources(state);
    println!();
    print_markdown_workflow();
    println!();
    print_markdown_configuration(state);
}

fn print_markdown_header(version: &str) {
    println!(
        "\
# refmd {version}

Convert Sphinx cross-references to Markdown links — rewrite
`{{external+source:ref}}` markup so documentation text pastes cleanly
into issue trackers and other plain Markdown contexts.

## Reference Syntax

    {{external+source:ref}}`target`                   target is also the link text
    {{external+source:ref}}`display text <target>`    explicit link text

Known references become `[display text](url)`. Unknown ones keep only
their display text, so the output never contains broken markup.
"
    );
}

fn print_markdown_sources(state: &CurrentState) {
    println!("## Sources");
    println!();
    for source in &state.sources {
        let origin = if source.builtin { "built-in" } else { "config" };
        println!(
            "- `{}` -> {} ({} targets, {origin})",
            source.name, source.base_url, source.targets
        );
    }
}

fn print_markdown_workflow() {
    println!(
        "\
## Workflow

    refmd convert                     Convert stdin to stdout
    refmd convert docs/               Rewrite markdown files in place
    refmd convert docs/ --dry-run     Report what would change, write nothing
    refmd check docs/                 Report references that will not resolve
    refmd source list                 Show the merged source catalog
    refmd source add <name> <url>     Declare a source in .refmd.toml
    refmd source remove <name>        Remove a declared source
    refmd info [--json]               This document / machine-readable state

## Exit Codes (check)

    0    all references resolve
    1    unknown targets only
    2    unknown sources present"
    );
}

fn print_markdown_configuration(state: &CurrentState) {
    let found = if state.config_found { "found" } else { "not found" };
    println!(
        "\
## Configuration

`.refmd.toml` ({found}) extends the built-in catalog:

    [sources.wiki]
    base-url = \"https://example.com/wiki/\"

    [sources.wiki.targets.getting-started]
    path = \"tutorial/\"
    fragment = \"intro\""
    );
}

// ── JSON output ───────────────────────────────────────────────────────

fn print_json(state: &CurrentState) {
    if let Ok(out) = serde_json::to_string_pretty(state) {
        println!("{out}");
    }
}
