use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
/// Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::BuiltinSource { name } => render_builtin_source(name),
        Error::SourceExists { name } => render_source_exists(name),
        Error::SourceMissingBaseUrl { name } => render_source_missing_base_url(name),
        Error::UnknownSource { name } => render_unknown_source(name),
        _ => render_generic(e),
    }
}

fn render_builtin_source(name: &str) -> String {
    format!(
        "\
# Error: Built-in Source

`{name}` is compiled into refmd and cannot be removed.

## Fix

Override its base URL or targets in `.refmd.toml` instead:

    refmd source add {name} <base-url>
"
    )
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Correct `.refmd.toml` — refmd never falls back to built-ins when a
config file exists but is malformed.
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_source_exists(name: &str) -> String {
    format!(
        "\
# Error: Source Already Configured

`{name}` is already declared in `.refmd.toml`.

## Fix

Edit the existing entry, or remove it first:

    refmd source remove {name}
"
    )
}

fn render_source_missing_base_url(name: &str) -> String {
    format!(
        "\
# Error: Source Missing Base URL

`{name}` is declared in `.refmd.toml` without a `base-url`, and is not
a built-in source.

## Fix

Add one to `.refmd.toml`:

    [sources.{name}]
    base-url = \"https://example.com/docs/\"
"
    )
}

fn render_unknown_source(name: &str) -> String {
    format!(
        "\
# Error: Unknown Source

Source `{name}` is neither built in nor configured.

## Fix

Declare it in `.refmd.toml`:

    refmd source add {name} <base-url>
"
    )
}
