//! Design-token compilation.

use formforge_core::DesignTokenSet;

/// Render `tokens` as CSS custom-property declarations, one
/// `  name: value;` line per entry in insertion order.
///
/// Names and values are emitted verbatim. An empty set compiles to `""`.
pub fn compile(tokens: &DesignTokenSet) -> String {
    let mut css = String::new();
    for (name, value) in tokens.iter() {
        css.push_str("  ");
        css.push_str(name);
        css.push_str(": ");
        css.push_str(value);
        css.push_str(";\n");
    }
    css
}
