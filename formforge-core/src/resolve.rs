//! Effective-property resolution.
//!
//! An instance's own bag wins; any key it lacks is filled from the type's
//! defaults. The result is a fresh bag, so the registry defaults are never
//! reachable through it.

use std::borrow::Cow;

use crate::error::FormError;
use crate::registry::{self, FieldKind, FieldTypeDefinition, FieldTypeRegistry};
use crate::types::{FieldInstance, OptionPair, PropValue, PropertyBag};

/// Fully-populated property bag for one instance, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProps {
    pub kind: FieldKind,
    props: PropertyBag,
}

impl ResolvedProps {
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Text form of a property; absent → empty.
    pub fn text(&self, name: &str) -> Cow<'_, str> {
        self.props
            .get(name)
            .map(PropValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Flag form of a property; absent → `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.props.get(name).is_some_and(PropValue::as_flag)
    }

    /// Option list of a property; absent or not a list → empty.
    pub fn options(&self, name: &str) -> &[OptionPair] {
        self.props
            .get(name)
            .map(PropValue::as_options)
            .unwrap_or(&[])
    }

    pub fn as_bag(&self) -> &PropertyBag {
        &self.props
    }

    pub fn into_bag(self) -> PropertyBag {
        self.props
    }
}

/// Resolve `instance` against the process-wide registry.
pub fn resolve(instance: &FieldInstance) -> Result<ResolvedProps, FormError> {
    resolve_with(registry::registry(), instance)
}

/// Resolve `instance` against an explicit registry.
///
/// Fails with [`FormError::UnknownFieldType`] when the instance's type key is
/// not registered.
pub fn resolve_with(
    registry: &FieldTypeRegistry,
    instance: &FieldInstance,
) -> Result<ResolvedProps, FormError> {
    let definition =
        registry
            .lookup(&instance.type_key)
            .ok_or_else(|| FormError::UnknownFieldType {
                key: instance.type_key.clone(),
            })?;
    Ok(merge(definition, &instance.props))
}

fn merge(definition: &FieldTypeDefinition, own: &PropertyBag) -> ResolvedProps {
    let mut props = own.clone();
    for (name, default) in &definition.defaults {
        if !props.contains_key(name) {
            props.insert(name.clone(), default.clone());
        }
    }
    ResolvedProps {
        kind: definition.kind,
        props,
    }
}
