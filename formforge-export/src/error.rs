//! Error types for formforge-export.

use std::path::PathBuf;

use thiserror::Error;

use formforge_core::FormError;

/// All errors that can arise from export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document shell could not be read. Nothing is delivered.
    #[error("cannot load template shell {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `config.yaml` or a token file exists but is not valid YAML.
    #[error("invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Could not determine the user's home directory.
    #[error("could not determine home directory")]
    HomeNotFound,

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Convenience constructor for [`ExportError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.into(),
        source,
    }
}
