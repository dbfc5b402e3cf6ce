//! Escape-on-construction element tree.
//!
//! Every string that enters an [`Element`] is escaped at the moment it is
//! attached: attribute values against their quote character, text against
//! `<`, `>` and `&`. Serialisation is then plain concatenation, so a
//! [`Markup`] value can only hold closed, escaped markup.
//!
//! Serialised layout: one element per line, two-space indent per level.
//! Elements whose children are all text stay on one line. Embedded
//! [`Markup`] is copied as-is, without re-indenting.

use std::borrow::Cow;
use std::fmt;

/// Elements that have no closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialised markup produced by [`Element::render`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
struct Attr {
    name: &'static str,
    /// Quoted and escaped value, e.g. `"a &amp; b"`; `None` for bare flags.
    value: Option<String>,
}

#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    /// Escaped text.
    Text(String),
    /// Literal markup compiled into the binary, e.g. `&nbsp;`.
    Static(&'static str),
    /// Already-serialised subtree.
    Markup(Markup),
}

impl Node {
    fn is_inline(&self) -> bool {
        matches!(self, Node::Text(_) | Node::Static(_))
    }
}

/// An HTML element under construction.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Cow<'static, str>,
    attrs: Vec<Attr>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag: Cow::Borrowed(tag),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element with a caller-supplied tag name, or `None` if `tag` is not a
    /// plain element name (ASCII letter followed by letters, digits or `-`)
    /// or names a void element, which could not hold children.
    pub fn named(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        if !is_valid_tag_name(&tag) || VOID_ELEMENTS.contains(&tag.as_str()) {
            return None;
        }
        Some(Self {
            tag: Cow::Owned(tag),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `name="value"`, escaped.
    pub fn attr(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.attrs.push(Attr {
            name,
            value: Some(quote_attr(value.as_ref())),
        });
        self
    }

    pub fn attr_if(self, cond: bool, name: &'static str, value: impl AsRef<str>) -> Self {
        if cond {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// `class="…"`, omitted entirely when `class` is empty.
    pub fn class(self, class: &str) -> Self {
        let present = !class.is_empty();
        self.attr_if(present, "class", class)
    }

    /// Bare boolean attribute, e.g. `required`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push(Attr { name, value: None });
        self
    }

    pub fn flag_if(self, cond: bool, name: &'static str) -> Self {
        if cond {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.children
            .push(Node::Text(html_escape::encode_text(text.as_ref()).into_owned()));
        self
    }

    pub fn static_text(mut self, literal: &'static str) -> Self {
        self.children.push(Node::Static(literal));
        self
    }

    /// Embed an already-rendered subtree.
    pub fn markup(mut self, markup: Markup) -> Self {
        self.children.push(Node::Markup(markup));
        self
    }

    /// Serialise the tree.
    pub fn render(&self) -> Markup {
        let mut out = String::new();
        self.write_to(&mut out, 0);
        Markup(out)
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_ref())
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        out.push('<');
        out.push_str(&self.tag);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(attr.name);
            if let Some(value) = &attr.value {
                out.push('=');
                out.push_str(value);
            }
        }
        out.push('>');

        if self.is_void() {
            out.push('\n');
            return;
        }

        if self.children.iter().all(Node::is_inline) {
            for child in &self.children {
                write_inline(out, child);
            }
        } else {
            out.push('\n');
            for child in &self.children {
                match child {
                    Node::Element(el) => el.write_to(out, depth + 1),
                    // Inserted verbatim: its lines may sit inside attribute
                    // values or text, where added indentation would change them.
                    Node::Markup(m) => {
                        out.push_str(m.as_str());
                        if !m.as_str().ends_with('\n') {
                            out.push('\n');
                        }
                    }
                    inline => {
                        indent(out, depth + 1);
                        write_inline(out, inline);
                        out.push('\n');
                    }
                }
            }
            indent(out, depth);
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Text(s) => out.push_str(s),
        Node::Static(s) => out.push_str(s),
        Node::Element(_) | Node::Markup(_) => {}
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Quote and escape an attribute value.
///
/// Double quotes are the default. A value that contains `"` but no `'`
/// (typically embedded JSON) is single-quoted instead so it stays readable.
fn quote_attr(value: &str) -> String {
    if value.contains('"') && !value.contains('\'') {
        format!("'{}'", html_escape::encode_single_quoted_attribute(value))
    } else {
        format!("\"{}\"", html_escape::encode_double_quoted_attribute(value))
    }
}

/// Escape a value for text or quoted-attribute position.
///
/// Used for values spliced into a template shell, whose surrounding context
/// is unknown.
pub fn escape_text_or_attr(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}

pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_element_renders_on_one_line() {
        let m = Element::new("label").attr("for", "x-1").text("Email").render();
        assert_eq!(m.as_str(), "<label for=\"x-1\">Email</label>\n");
    }

    #[test]
    fn nested_elements_are_indented() {
        let m = Element::new("div")
            .child(Element::new("span").text("a"))
            .render();
        assert_eq!(m.as_str(), "<div>\n  <span>a</span>\n</div>\n");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let m = Element::new("input").attr("type", "text").flag("required").render();
        assert_eq!(m.as_str(), "<input type=\"text\" required>\n");
    }

    #[test]
    fn text_is_escaped() {
        let m = Element::new("p").text("<b>Tom & Jerry</b>").render();
        assert_eq!(m.as_str(), "<p>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</p>\n");
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        let m = Element::new("input")
            .attr("title", "say \"hi\" & 'bye'")
            .render();
        assert!(m.as_str().starts_with("<input title=\""));
        assert!(!m.as_str().contains("\"hi\""));
        assert!(m.as_str().contains("&amp;"));
    }

    #[test]
    fn json_attribute_is_single_quoted() {
        let m = Element::new("div").attr("data-options", r#"[{"value":"1"}]"#).render();
        assert_eq!(m.as_str(), "<div data-options='[{\"value\":\"1\"}]'></div>\n");
    }

    #[test]
    fn json_with_apostrophe_falls_back_to_double_quotes() {
        let m = Element::new("div")
            .attr("data-options", r#"[{"label":"Don't"}]"#)
            .render();
        let s = m.as_str();
        assert!(s.starts_with("<div data-options=\""));
        assert_eq!(s.matches('"').count(), 2, "inner quotes must be entity-encoded: {s}");
    }

    #[test]
    fn empty_class_is_omitted() {
        let m = Element::new("div").class("").attr("data-x", "1").render();
        assert_eq!(m.as_str(), "<div data-x=\"1\"></div>\n");
    }

    #[test]
    fn embedded_markup_is_inserted_verbatim() {
        let inner = Element::new("div")
            .child(Element::new("pre").text("line1\nline2"))
            .render();
        let m = Element::new("section").markup(inner.clone()).render();
        assert_eq!(
            m.as_str(),
            "<section>\n<div>\n  <pre>line1\nline2</pre>\n</div>\n</section>\n"
        );
        assert!(m.as_str().contains(inner.as_str()));
    }

    #[test]
    fn dynamic_tag_names_are_validated() {
        assert!(Element::named("h2").is_some());
        assert!(Element::named("my-tag").is_some());
        assert!(Element::named("").is_none());
        assert!(Element::named("p onclick=x").is_none());
        assert!(Element::named("1p").is_none());
        assert!(Element::named("p><script").is_none());
        assert!(Element::named("input").is_none());
        assert_eq!(Element::named("H2").unwrap().tag(), "h2");
    }
}
