/// Crate-level error types for refmd.
use std::path::PathBuf;

/// All errors in refmd carry enough context to produce a useful diagnostic
/// without a debugger. Conversion itself never fails; these cover the
/// config and CLI layers around it.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named source is compiled in and cannot be removed from config.
    #[error("source `{name}` is built in and cannot be removed")]
    BuiltinSource {
        /// Name of the built-in source.
        name: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The config file exists but toml_edit could not parse it.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A source being added is already defined in the config file.
    #[error("source `{name}` is already configured")]
    SourceExists {
        /// Name of the already-configured source.
        name: String,
    },

    /// A config-defined source is not built in and carries no base URL.
    #[error("source `{name}` has no base-url")]
    SourceMissingBaseUrl {
        /// Name of the source missing its base URL.
        name: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No catalog source matches the given name.
    #[error("unknown source: `{name}`")]
    UnknownSource {
        /// Source name that was not found.
        name: String,
    },
}
