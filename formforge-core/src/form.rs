//! Form documents: collaborator-side mutations and YAML persistence.
//!
//! # Storage layout
//!
//! A form lives in a single YAML file chosen by the caller:
//!
//! ```text
//! title: Contact Form
//! audience: contact
//! fields:
//!   - id: lx3k9a2b0000
//!     type: email
//!     props:
//!       label: Email
//!       ...
//! ```
//!
//! Saves are atomic: serialize → `.tmp` sibling → `rename`.
//!
//! The compiler never calls anything in the mutation half of this module; it
//! only reads a [`FormDocument`] snapshot.

use std::path::{Path, PathBuf};

use crate::error::FormError;
use crate::registry::{self, FieldTypeDefinition};
use crate::types::{Audience, FieldId, FieldInstance, FormDocument, PropValue};

// ---------------------------------------------------------------------------
// 1. Construction
// ---------------------------------------------------------------------------

impl FieldInstance {
    /// New instance of `definition` with a fresh id.
    ///
    /// The property bag is a deep copy of the registry defaults; mutating it
    /// never touches the shared definition.
    pub fn from_definition(definition: &FieldTypeDefinition) -> Self {
        Self {
            id: FieldId::generate(),
            type_key: definition.key.to_string(),
            props: definition.defaults.clone(),
        }
    }
}

impl FormDocument {
    /// Empty form with the given title and the default audience.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            audience: Audience::default(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldInstance> {
        self.fields.iter().find(|f| &f.id == id)
    }

    // -----------------------------------------------------------------------
    // 2. Mutation
    // -----------------------------------------------------------------------

    /// Place a new field of type `type_key`.
    ///
    /// `index = None` appends; `Some(i)` inserts before position `i`
    /// (`i == len` appends). Returns the id of the new instance.
    pub fn add_field(
        &mut self,
        type_key: &str,
        index: Option<usize>,
    ) -> Result<FieldId, FormError> {
        let definition =
            registry::lookup(type_key).ok_or_else(|| FormError::UnknownFieldType {
                key: type_key.to_string(),
            })?;
        let instance = FieldInstance::from_definition(definition);
        let id = instance.id.clone();
        match index {
            None => self.fields.push(instance),
            Some(i) if i <= self.fields.len() => self.fields.insert(i, instance),
            Some(i) => {
                return Err(FormError::IndexOutOfRange {
                    index: i,
                    len: self.fields.len(),
                })
            }
        }
        Ok(id)
    }

    /// Remove a field and return it.
    pub fn remove_field(&mut self, id: &FieldId) -> Result<FieldInstance, FormError> {
        let pos = self
            .fields
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| FormError::FieldNotFound { id: id.clone() })?;
        Ok(self.fields.remove(pos))
    }

    /// Set one property on one field. The only way a field's bag changes.
    pub fn update_field_prop(
        &mut self,
        id: &FieldId,
        name: &str,
        value: PropValue,
    ) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| FormError::FieldNotFound { id: id.clone() })?;
        field.props.insert(name.to_string(), value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 3. Load / save
// ---------------------------------------------------------------------------

/// Load a form document from `path`.
///
/// Returns `FormError::FormNotFound` if absent,
/// `FormError::Parse` (with path + line context) if malformed YAML.
pub fn load_form_at(path: &Path) -> Result<FormDocument, FormError> {
    if !path.exists() {
        return Err(FormError::FormNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| FormError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically save `form` to `path`, creating parent directories as needed.
pub fn save_form_at(path: &Path, form: &FormDocument) -> Result<(), FormError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = tmp_sibling(path);
    let yaml = serde_yaml::to_string(form)?;
    std::fs::write(&tmp_path, yaml)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn add_field_seeds_defaults_as_a_copy() {
        let mut form = FormDocument::new("Contact Form");
        let id = form.add_field("email", None).expect("add");
        form.update_field_prop(&id, "label", PropValue::from("Work email"))
            .expect("update");

        let defaults = &registry::lookup("email").unwrap().defaults;
        assert_eq!(defaults["label"], PropValue::from("Email"));
        assert_eq!(form.field(&id).unwrap().props["label"], PropValue::from("Work email"));
    }

    #[test]
    fn add_field_inserts_at_index() {
        let mut form = FormDocument::new("f");
        form.add_field("text", None).unwrap();
        form.add_field("submit", None).unwrap();
        let id = form.add_field("email", Some(1)).unwrap();
        assert_eq!(form.fields[1].id, id);
        assert_eq!(form.fields[2].type_key, "submit");
    }

    #[test]
    fn add_field_rejects_unknown_type_and_bad_index() {
        let mut form = FormDocument::new("f");
        let err = form.add_field("signature", None).unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldType { .. }));
        let err = form.add_field("text", Some(3)).unwrap_err();
        assert!(matches!(err, FormError::IndexOutOfRange { index: 3, len: 0 }));
        assert!(form.fields.is_empty());
    }

    #[test]
    fn remove_field_by_id() {
        let mut form = FormDocument::new("f");
        let a = form.add_field("text", None).unwrap();
        let b = form.add_field("divider", None).unwrap();
        let removed = form.remove_field(&a).expect("remove");
        assert_eq!(removed.id, a);
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.fields[0].id, b);
        assert!(matches!(
            form.remove_field(&a).unwrap_err(),
            FormError::FieldNotFound { .. }
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("forms").join("contact.yaml");
        let mut form = FormDocument::new("Contact Form");
        form.add_field("radio", None).unwrap();
        form.add_field("submit", None).unwrap();

        save_form_at(&path, &form).expect("save");
        let loaded = load_form_at(&path).expect("load");
        assert_eq!(loaded, form);
        assert!(!tmp_sibling(&path).exists(), ".tmp must be gone after save");
    }

    #[test]
    fn load_missing_form_returns_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = load_form_at(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, FormError::FormNotFound { .. }));
    }
}
