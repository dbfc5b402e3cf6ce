//! Error types for formforge-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::FieldId;

/// All errors that can arise from form-model and registry operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse form at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The form document file did not exist at the expected path.
    #[error("form not found at {path}")]
    FormNotFound { path: PathBuf },

    /// A type key that the field-type registry does not know.
    #[error("unknown field type '{key}'")]
    UnknownFieldType { key: String },

    /// No field with this id in the document.
    #[error("no field with id '{id}'")]
    FieldNotFound { id: FieldId },

    /// Insert position past the end of the field list.
    #[error("insert position {index} is out of range for a form with {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}
