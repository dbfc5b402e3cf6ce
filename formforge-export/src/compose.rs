//! Template composition.
//!
//! The shell carries three placeholders:
//!
//! | Placeholder         | Replaced with                                 |
//! |---------------------|-----------------------------------------------|
//! | `{{FORM_TITLE}}`    | escaped form title                            |
//! | `{{DESIGN_TOKENS}}` | compiled CSS custom properties                |
//! | `{{FORM_CONTENT}}`  | section/column wrapper around every fragment  |
//!
//! Substitution is one left-to-right scan of the shell. The first occurrence
//! of each placeholder is replaced; inserted text is never scanned again, so a
//! title or token value that happens to contain `{{FORM_CONTENT}}` stays
//! literal.

use std::fmt;

use formforge_renderer::markup::escape_text_or_attr;
use formforge_renderer::{Element, Markup};

/// Title used when a form has none.
pub const DEFAULT_TITLE: &str = "Marketing Form";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Title,
    Tokens,
    Content,
}

impl Placeholder {
    pub fn all() -> &'static [Placeholder] {
        &[Placeholder::Title, Placeholder::Tokens, Placeholder::Content]
    }

    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Title => "{{FORM_TITLE}}",
            Placeholder::Tokens => "{{DESIGN_TOKENS}}",
            Placeholder::Content => "{{FORM_CONTENT}}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Result of [`compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub document: String,
    /// Placeholders absent from the shell; their segment was dropped.
    pub missing: Vec<Placeholder>,
    /// Placeholders that occur more than once; extra occurrences are left as-is.
    pub duplicates: Vec<Placeholder>,
}

/// Build the final document from a shell and its three segments.
///
/// Pure and infallible. An empty `title` falls back to [`DEFAULT_TITLE`].
pub fn compose(shell: &str, title: &str, token_css: &str, fragments: &[Markup]) -> Composition {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };
    let title = escape_text_or_attr(title);
    let content = content_block(fragments);

    let mut document = String::with_capacity(shell.len() + content.len() + token_css.len());
    let mut pending = Placeholder::all().to_vec();
    let mut duplicates = Vec::new();
    let mut rest = shell;

    loop {
        let next = Placeholder::all()
            .iter()
            .filter_map(|p| rest.find(p.token()).map(|at| (at, *p)))
            .min_by_key(|(at, _)| *at);
        let Some((at, placeholder)) = next else {
            document.push_str(rest);
            break;
        };

        document.push_str(&rest[..at]);
        if let Some(idx) = pending.iter().position(|p| *p == placeholder) {
            pending.remove(idx);
            document.push_str(match placeholder {
                Placeholder::Title => title.as_str(),
                Placeholder::Tokens => token_css,
                Placeholder::Content => content.as_str(),
            });
        } else {
            document.push_str(placeholder.token());
            if !duplicates.contains(&placeholder) {
                duplicates.push(placeholder);
            }
        }
        rest = &rest[at + placeholder.token().len()..];
    }

    Composition {
        document,
        missing: pending,
        duplicates,
    }
}

/// The single full-width section the runtime expects around form fields.
pub fn content_block(fragments: &[Markup]) -> Markup {
    let column = fragments.iter().cloned().fold(
        Element::new("div")
            .class("columnContainer")
            .attr("data-container", "true")
            .attr("data-container-width", "100")
            .attr("style", "width: 600px;"),
        Element::markup,
    );

    Element::new("div")
        .attr("data-section", "true")
        .class("emptyContainer columns-equal-class wrap-section")
        .attr("style", "padding: 0px; display: flex;")
        .child(column)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = "<title>{{FORM_TITLE}}</title>\n<style>\n:root {\n{{DESIGN_TOKENS}}}\n</style>\n<body>\n{{FORM_CONTENT}}</body>\n";

    fn fragment(text: &str) -> Markup {
        Element::new("p").text(text).render()
    }

    #[test]
    fn replaces_every_placeholder_once() {
        let out = compose(SHELL, "Contact", "  --a: 1px;\n", &[fragment("one")]);
        assert!(out.missing.is_empty());
        assert!(out.duplicates.is_empty());
        assert!(out.document.contains("<title>Contact</title>"));
        assert!(out.document.contains(":root {\n  --a: 1px;\n}"));
        assert!(out.document.contains("<p>one</p>"));
        assert!(!out.document.contains("{{"));
    }

    #[test]
    fn fragments_keep_their_order_inside_the_wrapper() {
        let out = compose(SHELL, "T", "", &[fragment("first"), fragment("second")]);
        let section = out.document.find("data-section=\"true\"").unwrap();
        let column = out.document.find("class=\"columnContainer\"").unwrap();
        let first = out.document.find("<p>first</p>").unwrap();
        let second = out.document.find("<p>second</p>").unwrap();
        assert!(section < column && column < first && first < second);
    }

    #[test]
    fn wrapper_attributes_match_runtime_layout() {
        let block = content_block(&[]);
        assert_eq!(
            block.as_str(),
            "<div data-section=\"true\" class=\"emptyContainer columns-equal-class wrap-section\" \
             style=\"padding: 0px; display: flex;\">\n  \
             <div class=\"columnContainer\" data-container=\"true\" data-container-width=\"100\" \
             style=\"width: 600px;\"></div>\n</div>\n"
        );
    }

    #[test]
    fn empty_title_falls_back() {
        let out = compose(SHELL, "", "", &[]);
        assert!(out.document.contains("<title>Marketing Form</title>"));
        let out = compose(SHELL, "   ", "", &[]);
        assert!(out.document.contains("<title>Marketing Form</title>"));
    }

    #[test]
    fn title_is_escaped() {
        let out = compose(SHELL, "</title><script>x</script>", "", &[]);
        assert!(!out.document.contains("<script>"));
        assert!(out.document.contains("&lt;/title&gt;"));
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        let out = compose(SHELL, "{{FORM_CONTENT}}", "", &[fragment("body")]);
        assert!(out.document.contains("<title>{{FORM_CONTENT}}</title>"));
        assert_eq!(out.document.matches("<p>body</p>").count(), 1);
        assert!(out.duplicates.is_empty());
    }

    #[test]
    fn order_of_placeholders_in_shell_does_not_matter() {
        let shell = "{{FORM_CONTENT}}|{{DESIGN_TOKENS}}|{{FORM_TITLE}}";
        let out = compose(shell, "T", "css", &[]);
        assert!(out.document.ends_with("|css|T"));
        assert!(out.missing.is_empty());
    }

    #[test]
    fn missing_placeholder_drops_segment_and_is_reported() {
        let out = compose("<title>{{FORM_TITLE}}</title>", "T", "  --a: 1px;\n", &[fragment("x")]);
        assert_eq!(out.document, "<title>T</title>");
        assert_eq!(out.missing, vec![Placeholder::Tokens, Placeholder::Content]);
    }

    #[test]
    fn duplicate_placeholder_is_left_verbatim_and_reported() {
        let out = compose("{{FORM_TITLE}} {{FORM_TITLE}}", "T", "", &[]);
        assert_eq!(out.document, "T {{FORM_TITLE}}");
        assert_eq!(out.duplicates, vec![Placeholder::Title]);
    }
}
