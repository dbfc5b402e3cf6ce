//! formforge core library: form model, field-type registry, property resolution.
//!
//! Public API surface:
//! - [`types`]: newtypes and domain structs
//! - [`error`]: [`FormError`]
//! - [`registry`]: the fixed field-type catalogue
//! - [`resolve`]: instance props merged with type defaults
//! - [`form`]: document mutations and load / save

pub mod error;
pub mod form;
pub mod registry;
pub mod resolve;
pub mod types;

pub use error::FormError;
pub use registry::{Category, FieldKind, FieldTypeDefinition, FieldTypeRegistry};
pub use resolve::{resolve, ResolvedProps};
pub use types::{
    Audience, DesignTokenSet, FieldId, FieldInstance, FormDocument, OptionPair, PropValue,
    PropertyBag,
};
