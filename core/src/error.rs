//! Error types for the variable export.
//!
//! None of these abort an export run. Lookup failures are logged and the
//! affected value falls back to a default, tree conflicts skip one variable,
//! and [`ExportWarning`]s are reported to the message sink.

/// Failure raised by a [`VariableSource`](crate::source::VariableSource) lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("lookup of {kind} `{id}` failed: {message}")]
    Lookup {
        kind: &'static str,
        id: String,
        message: String,
    },

    #[error("could not enumerate collections: {message}")]
    Enumeration { message: String },

    #[error("invalid snapshot: {message}")]
    Snapshot { message: String },
}

impl SourceError {
    pub fn lookup(kind: &'static str, id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            kind,
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Insertion into a token tree that would break the leaf/object structure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("variable path is empty")]
    EmptyPath,

    #[error("`{path}` conflicts with an existing {existing} at `{at}`")]
    PathConflict {
        path: String,
        at: String,
        existing: &'static str,
    },
}

/// Conditions reported to the sink as `error` messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportWarning {
    #[error("No variable collections found in this file")]
    NoCollections,

    #[error("Collection \"{name}\" has no variables and was skipped")]
    EmptyCollection { name: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown color format `{0}`, expected `hex` or `hex-alpha`")]
    UnknownColorFormat(String),
}
