//! Conversion of Sphinx external-reference markup to Markdown links.
//!
//! Recognizes `` {external+source:ref}`display text <target>` `` and
//! `` {external+source:ref}`target` ``. Known references become
//! `[display text](url)`; unknown ones degrade to the bare display text
//! rather than leaving broken markup behind. Everything else passes
//! through verbatim, so conversion never fails.

use regex::{Captures, Regex};

use crate::catalog::Catalog;
use crate::types::{Reference, Resolution};

/// The compiled reference grammar plus the catalog it resolves against.
/// Holds no mutable state; safe to share across threads.
pub struct Converter {
    catalog: Catalog,
    payload: Regex,
    reference: Regex,
}

impl Converter {
    /// Compile the reference grammar around the given catalog.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded regexes are invalid (compile-time invariant).
    pub fn new(catalog: Catalog) -> Self {
        // {external+source:ref}`payload` — source is lowercase letters/hyphens.
        let reference = Regex::new(r"\{external\+([a-z-]+):ref\}`([^`]+)`").expect("valid regex");
        // payload shape `display text <target>` — target is lowercase
        // alphanumerics and hyphens.
        let payload = Regex::new(r"^(.*?)\s*<([a-z0-9-]+)>$").expect("valid regex");
        return Self { catalog, payload, reference };
    }

    /// The catalog this converter resolves against.
    pub fn catalog(&self) -> &Catalog {
        return &self.catalog;
    }

    /// Replace every reference occurrence in a single left-to-right pass.
    /// Text without markup comes back unchanged, byte for byte.
    pub fn convert(&self, text: &str) -> String {
        return self
            .reference
            .replace_all(text, |cap: &Captures<'_>| return self.replace_reference_capture(cap))
            .into_owned();
    }

    /// Count reference occurrences without replacing them.
    pub fn count_references(&self, text: &str) -> usize {
        return self.reference.find_iter(text).count();
    }

    /// Scan text line by line and report every reference occurrence
    /// with its location, for resolution reporting.
    pub fn find_references(&self, text: &str) -> Vec<Reference> {
        let mut references = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            for cap in self.reference.captures_iter(line) {
                let (_display, target) = self.split_payload_into_display_and_target(cap[2].trim());
                references.push(Reference {
                    line: u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1),
                    source: cap[1].to_string(),
                    target: target.to_string(),
                });
            }
        }
        return references;
    }

    /// Produce the replacement for one matched reference.
    /// Resolvable references become Markdown links; the rest keep only
    /// their display text.
    fn replace_reference_capture(&self, cap: &Captures<'_>) -> String {
        let source = &cap[1];
        let (display, target) = self.split_payload_into_display_and_target(cap[2].trim());

        return match self.catalog.resolve(source, target) {
            Resolution::Resolved(url) => format!("[{display}]({url})"),
            Resolution::UnknownSource | Resolution::UnknownTarget => display.to_string(),
        };
    }

    /// Split a payload into display text and target id.
    /// `display text <target>` separates the two; any other payload is
    /// both at once.
    fn split_payload_into_display_and_target<'a>(&self, payload: &'a str) -> (&'a str, &'a str) {
        let Some(cap) = self.payload.captures(payload) else {
            return (payload, payload);
        };
        let display = cap.get(1).map_or("", |m| return m.as_str()).trim();
        let target = cap.get(2).map_or("", |m| return m.as_str());
        return (display, target);
    }
}
