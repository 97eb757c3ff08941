//! Core CLI commands for refmd: convert and check.

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::convert::Converter;
use crate::error::Error;
use crate::types::Resolution;

/// Scan input for references and report every one that would not
/// resolve, without rewriting anything.
///
/// Reads stdin when no paths are given.
///
/// # Errors
///
/// Returns errors from catalog loading or input reading.
pub fn check(paths: &[PathBuf]) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let converter = Converter::new(Catalog::load(&root)?);

    let inputs = gather_inputs(paths)?;
    let mut resolved_count = 0_u32;
    let mut unknown_source_count = 0_u32;
    let mut unknown_target_count = 0_u32;

    for (label, content) in &inputs {
        for reference in converter.find_references(content) {
            match converter.catalog().resolve(&reference.source, &reference.target) {
                Resolution::Resolved(_) => {
                    resolved_count = resolved_count.saturating_add(1);
                },
                Resolution::UnknownSource => {
                    unknown_source_count = unknown_source_count.saturating_add(1);
                    println!(
                        "UNRESOLVED  {label}:{}  {}:{} (unknown source)",
                        reference.line, reference.source, reference.target
                    );
                },
                Resolution::UnknownTarget => {
                    unknown_target_count = unknown_target_count.saturating_add(1);
                    println!(
                        "UNRESOLVED  {label}:{}  {}:{} (unknown target)",
                        reference.line, reference.source, reference.target
                    );
                },
            }
        }
    }

    // Exit code priority: unknown source (2) > unknown target (1) > clean (0).
    if unknown_source_count > 0 {
        println!();
        println!("{unknown_source_count} unknown sources, {unknown_target_count} unknown targets");
        return Ok(ExitCode::from(2));
    } else if unknown_target_count > 0 {
        println!();
        println!("{unknown_target_count} unknown targets");
        return Ok(ExitCode::from(1));
    } else {
        println!("All {resolved_count} references resolve");
        return Ok(ExitCode::SUCCESS);
    }
}

/// Expand paths into a sorted list of markdown files.
/// Directories are walked recursively for `.md` files; explicitly named
/// files are taken as-is.
fn collect_markdown_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    return files;
}

/// Rewrite references as Markdown links.
///
/// With no paths, reads stdin and writes the converted text to stdout.
/// With paths, rewrites each markdown file in place; `--dry-run` only
/// reports what would change.
///
/// # Errors
///
/// Returns errors from catalog loading or file I/O.
pub fn convert(paths: &[PathBuf], dry_run: bool) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let converter = Converter::new(Catalog::load(&root)?);

    if paths.is_empty() {
        let content = read_stdin()?;
        print!("{}", converter.convert(&content));
        return Ok(ExitCode::SUCCESS);
    }

    let files = collect_markdown_files(paths);
    let mut converted_total = 0_usize;
    let mut changed_files = 0_usize;

    for file in &files {
        let count = convert_file(&converter, file, dry_run)?;
        if count > 0 {
            changed_files = changed_files.saturating_add(1);
            converted_total = converted_total.saturating_add(count);
        }
    }

    if dry_run {
        println!("Would convert {converted_total} references in {changed_files} files");
    } else {
        println!("Converted {converted_total} references in {changed_files} files");
    }
    return Ok(ExitCode::SUCCESS);
}

/// Convert one markdown file in place. Returns the number of references
/// replaced. Files without references are left untouched.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read or written.
fn convert_file(converter: &Converter, path: &Path, dry_run: bool) -> Result<usize, Error> {
    let content = std::fs::read_to_string(path)?;
    let count = converter.count_references(&content);
    if count == 0 {
        return Ok(0);
    }

    if dry_run {
        println!("{}: {count} references", path.display());
        return Ok(count);
    }

    std::fs::write(path, converter.convert(&content))?;
    println!("{}: converted {count} references", path.display());
    return Ok(count);
}

/// Read all inputs as (label, content) pairs — stdin when no paths are given.
///
/// # Errors
///
/// Returns `Error::Io` if any input cannot be read.
fn gather_inputs(paths: &[PathBuf]) -> Result<Vec<(String, String)>, Error> {
    if paths.is_empty() {
        return Ok(vec![("<stdin>".to_string(), read_stdin()?)]);
    }

    let mut inputs = Vec::new();
    for file in collect_markdown_files(paths) {
        let content = std::fs::read_to_string(&file)?;
        inputs.push((file.display().to_string(), content));
    }
    return Ok(inputs);
}

/// Read stdin to end.
///
/// # Errors
///
/// Returns `Error::Io` on read failure.
fn read_stdin() -> Result<String, Error> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    return Ok(content);
}
