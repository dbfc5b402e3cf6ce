//! Export pipeline: render every field, compile tokens, compose the shell.
//!
//! [`export`] is the canonical entrypoint for `formforge export` and
//! `formforge diff`. The shell load is the only await point; everything after
//! it is synchronous and works on the snapshot it was handed.

use formforge_core::{DesignTokenSet, FieldId, FormDocument};
use formforge_renderer::{Markup, RenderError, Renderer};

use crate::compose::{compose, Placeholder};
use crate::error::ExportError;
use crate::shell::{load_shell, ShellSource};
use crate::tokens;

/// A field left out of the document because it could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub id: FieldId,
    pub type_key: String,
    pub reason: String,
}

/// Everything one export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub document: String,
    pub filename: String,
    pub rendered: usize,
    pub skipped: Vec<SkippedField>,
    pub missing_placeholders: Vec<Placeholder>,
    pub duplicate_placeholders: Vec<Placeholder>,
}

impl ExportReport {
    /// Whether the export dropped anything the caller should hear about.
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
            || !self.missing_placeholders.is_empty()
            || !self.duplicate_placeholders.is_empty()
    }
}

/// Artifact filename for a title: lower-cased, each whitespace run replaced
/// by `-`, suffixed `.html`. Path separators are replaced as well so the
/// artifact always lands directly in the output directory.
///
/// The title is trimmed first, so `" Padded "` gives `padded.html` rather
/// than `-padded-.html`.
pub fn export_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 5);
    let mut in_space = false;
    for c in title.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '/' | '\\' => name.push('-'),
            c => name.extend(c.to_lowercase()),
        }
    }
    name.push_str(".html");
    name
}

/// Title used for both the document and the filename.
pub fn effective_title<'a>(form: &'a FormDocument, fallback: &'a str) -> &'a str {
    if form.title.trim().is_empty() {
        fallback
    } else {
        &form.title
    }
}

/// Render each field in document order. Fields that fail are skipped and
/// reported; the rest still render.
pub fn render_fields(form: &FormDocument) -> (Vec<Markup>, Vec<SkippedField>) {
    let renderer = Renderer::new();
    let mut fragments = Vec::with_capacity(form.fields.len());
    let mut skipped = Vec::new();

    for field in &form.fields {
        match renderer.render(field) {
            Ok(markup) => fragments.push(markup),
            Err(err) => {
                tracing::warn!(field = %field.id, "skipping field: {err}");
                let type_key = match &err {
                    RenderError::UnknownFieldType { key, .. } => key.clone(),
                    RenderError::Resolve { .. } => field.type_key.clone(),
                };
                skipped.push(SkippedField {
                    id: field.id.clone(),
                    type_key,
                    reason: err.to_string(),
                });
            }
        }
    }

    (fragments, skipped)
}

/// Compose a document from an already-loaded shell.
pub fn build(
    shell: &str,
    form: &FormDocument,
    tokens: &DesignTokenSet,
    title_fallback: &str,
) -> ExportReport {
    let title = effective_title(form, title_fallback);
    let (fragments, skipped) = render_fields(form);
    let composition = compose(shell, title, &tokens::compile(tokens), &fragments);

    for placeholder in &composition.missing {
        tracing::warn!("template shell has no {placeholder}; segment dropped");
    }
    for placeholder in &composition.duplicates {
        tracing::warn!("template shell repeats {placeholder}; extra occurrences left as-is");
    }

    ExportReport {
        document: composition.document,
        filename: export_filename(title),
        rendered: fragments.len(),
        skipped,
        missing_placeholders: composition.missing,
        duplicate_placeholders: composition.duplicates,
    }
}

/// Load the shell, then build the document.
///
/// Fails only when the shell cannot be loaded.
pub async fn export(
    form: &FormDocument,
    tokens: &DesignTokenSet,
    shell: &ShellSource,
    title_fallback: &str,
) -> Result<ExportReport, ExportError> {
    let shell = load_shell(shell).await?;
    Ok(build(&shell, form, tokens, title_fallback))
}
