/// Core domain types for refmd references and resolutions.

/// A cross-reference occurrence found in scanned text.
/// Parsed from `{external+source:ref}` markup by the converter.
#[derive(Debug, Clone)]
pub struct Reference {
    /// One-based line number of the occurrence in the scanned text.
    pub line: u32,
    /// Documentation source name (e.g. `charmcraft`).
    pub source: String,
    /// Anchor name the reference points to within the source.
    pub target: String,
}

/// Outcome of resolving a single reference against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The source and target are both known; carries the full URL.
    Resolved(String),
    /// No catalog source with this name.
    UnknownSource,
    /// The source is known but has no such target.
    UnknownTarget,
}
