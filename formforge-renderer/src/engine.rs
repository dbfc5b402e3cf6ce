//! Render engine: [`Renderer`] resolves an instance and applies its rule.
//!
//! # Markup contract
//!
//! | Kind          | `data-editorblocktype` | Control                          |
//! |---------------|------------------------|----------------------------------|
//! | text          | `TextFormField`        | `<input type="text">`            |
//! | email         | `TextFormField`        | `<input type="email">`           |
//! | phone         | `TextFormField`        | `<input type="tel" pattern>`     |
//! | textarea      | `TextAreaFormField`    | `<textarea>`                     |
//! | datetime      | `DateTimeFormField`    | `<input type="datetime-local">`  |
//! | dropdown      | `OptionSetFormField`   | `<select>`                       |
//! | checkbox      | `TwoOptionFormField`   | `<input type="checkbox">` + `data-options` |
//! | radio         | `TwoOptionFormField`   | `<input type="radio">` × n + `data-options` |
//! | consent       | `Consent`              | `<input type="checkbox">` with composite value |
//! | textBlock     | `Text`                 | none                             |
//! | divider       | `Divider`              | none                             |
//! | submit        | `SubmitButton`         | `<button type="submit">`         |

use formforge_core::registry::{self, FieldTypeRegistry};
use formforge_core::resolve::resolve_with;
use formforge_core::{FieldId, FieldInstance, ResolvedProps};

use crate::error::RenderError;
use crate::markup::Markup;
use crate::rules::rule_for;

/// Stateless renderer over the field-type registry.
///
/// Cheap to construct; holds only a reference to the read-only registry, so a
/// single instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    registry: &'static FieldTypeRegistry,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            registry: registry::registry(),
        }
    }

    /// Resolve `instance` against its type defaults and render it.
    ///
    /// Fails only when the instance's type key is not registered.
    pub fn render(&self, instance: &FieldInstance) -> Result<Markup, RenderError> {
        let props = resolve_with(self.registry, instance)
            .map_err(|e| RenderError::from_resolve(&instance.id, e))?;
        let markup = self.render_resolved(&props, &instance.id);
        tracing::debug!(
            field = %instance.id,
            kind = %props.kind,
            bytes = markup.len(),
            "rendered field"
        );
        Ok(markup)
    }

    /// Render already-resolved props. Infallible.
    pub fn render_resolved(&self, props: &ResolvedProps, id: &FieldId) -> Markup {
        rule_for(props.kind)(props, id).render()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
