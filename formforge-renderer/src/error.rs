//! Error types for formforge-renderer.

use thiserror::Error;

use formforge_core::{FieldId, FormError};

/// All errors that can arise from rendering a field instance.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The instance references a type key the registry does not know.
    #[error("field '{id}' has unknown type '{key}'")]
    UnknownFieldType { id: FieldId, key: String },

    /// Any other failure while resolving the instance's properties.
    #[error("cannot resolve field '{id}': {source}")]
    Resolve {
        id: FieldId,
        #[source]
        source: FormError,
    },
}

impl RenderError {
    pub(crate) fn from_resolve(id: &FieldId, err: FormError) -> Self {
        match err {
            FormError::UnknownFieldType { key } => RenderError::UnknownFieldType {
                id: id.clone(),
                key,
            },
            other => RenderError::Resolve {
                id: id.clone(),
                source: other,
            },
        }
    }
}
