//! Domain types for form documents.
//!
//! Everything here is plain data: serializable via serde + serde_yaml and free
//! of any reference into the field-type registry. Instances carry a *copy* of
//! their property bag, never a borrow of the registry defaults.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque identifier of a field instance, unique for the life of a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub String);

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl FieldId {
    /// Mint a fresh id: base-36 millisecond timestamp followed by a
    /// zero-padded base-36 per-process sequence number.
    ///
    /// The timestamp is 8 base-36 digits until 2059 and 9 after. Ids from
    /// one process stay distinct because the sequence never repeats.
    pub fn generate() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}{:0>4}", to_base36(millis), to_base36(seq)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Property values
// ---------------------------------------------------------------------------

/// One `{value, label}` entry of an option-bearing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPair {
    pub value: String,
    pub label: String,
}

impl OptionPair {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A typed property value.
///
/// Untagged so form files stay readable: `true` is a flag, `100` an integer,
/// `"Email"` text and a sequence of `{value, label}` maps an option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Options(Vec<OptionPair>),
}

impl PropValue {
    /// Text form of the value as it appears in markup.
    ///
    /// Integers and flags render verbatim; an option list has no text form
    /// and yields an empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            PropValue::Text(s) => Cow::Borrowed(s.as_str()),
            PropValue::Bool(b) => Cow::Owned(b.to_string()),
            PropValue::Int(n) => Cow::Owned(n.to_string()),
            PropValue::Options(_) => Cow::Borrowed(""),
        }
    }

    /// Truthiness used by flag properties such as `required` and `prefill`.
    pub fn as_flag(&self) -> bool {
        match self {
            PropValue::Bool(b) => *b,
            PropValue::Int(n) => *n != 0,
            PropValue::Text(s) => s.eq_ignore_ascii_case("true"),
            PropValue::Options(_) => false,
        }
    }

    pub fn as_options(&self) -> &[OptionPair] {
        match self {
            PropValue::Options(opts) => opts,
            _ => &[],
        }
    }

    /// Short name of the variant, used in CLI messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "boolean",
            PropValue::Int(_) => "integer",
            PropValue::Text(_) => "text",
            PropValue::Options(_) => "options",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Options(opts) => {
                let parts: Vec<String> =
                    opts.iter().map(|o| format!("{}={}", o.value, o.label)).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            other => f.write_str(&other.as_text()),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl From<Vec<OptionPair>> for PropValue {
    fn from(opts: Vec<OptionPair>) -> Self {
        PropValue::Options(opts)
    }
}

/// Property name → value, in declaration order.
pub type PropertyBag = IndexMap<String, PropValue>;

// ---------------------------------------------------------------------------
// Field instances and documents
// ---------------------------------------------------------------------------

/// A placed field: identity, the registry key of its type, and its own bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInstance {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(default)]
    pub props: PropertyBag,
}

/// Which backing entity the form targets. Only drives logical-name hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Contact,
    Lead,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Audience::Contact => "contact",
            Audience::Lead => "lead",
        };
        f.write_str(s)
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contact" => Ok(Audience::Contact),
            "lead" => Ok(Audience::Lead),
            other => Err(format!(
                "unknown audience '{other}'; expected: contact, lead"
            )),
        }
    }
}

/// An ordered form: field order is the DOM order of the exported markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub title: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub fields: Vec<FieldInstance>,
}

// ---------------------------------------------------------------------------
// Design tokens
// ---------------------------------------------------------------------------

/// CSS custom-property name → value, kept in insertion order.
///
/// Values are opaque strings; nothing here checks CSS syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignTokenSet(pub IndexMap<String, String>);

impl DesignTokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a token. Re-setting an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &DesignTokenSet) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DesignTokenSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = DesignTokenSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let ids: std::collections::HashSet<FieldId> =
            (0..500).map(|_| FieldId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn timestamp_width_grows_after_2059() {
        let last_8_digit = 36u64.pow(8) - 1;
        assert_eq!(to_base36(last_8_digit).len(), 8);
        assert_eq!(to_base36(last_8_digit + 1).len(), 9);
        // 2059-01-01T00:00:00Z is still 8 digits, 2060 is not.
        assert_eq!(to_base36(2_808_604_800_000).len(), 8);
        assert_eq!(to_base36(2_840_140_800_000).len(), 9);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn prop_value_text_forms() {
        assert_eq!(PropValue::Int(-3).as_text(), "-3");
        assert_eq!(PropValue::from(true).as_text(), "true");
        assert_eq!(PropValue::from("x").as_text(), "x");
        assert_eq!(PropValue::Options(vec![]).as_text(), "");
    }

    #[test]
    fn prop_value_untagged_yaml() {
        let yaml = "a: true\nb: 100\nc: hello\nd:\n  - value: '1'\n    label: Yes\n";
        let bag: PropertyBag = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bag["a"], PropValue::Bool(true));
        assert_eq!(bag["b"], PropValue::Int(100));
        assert_eq!(bag["c"], PropValue::from("hello"));
        assert_eq!(bag["d"].as_options(), &[OptionPair::new("1", "Yes")]);
    }

    #[test]
    fn token_merge_keeps_position_and_overrides_value() {
        let mut base: DesignTokenSet = [("--a", "1px"), ("--b", "red")].into_iter().collect();
        let overlay: DesignTokenSet = [("--a", "2px"), ("--c", "0")].into_iter().collect();
        base.merge(&overlay);
        let entries: Vec<_> = base.iter().collect();
        assert_eq!(entries, vec![("--a", "2px"), ("--b", "red"), ("--c", "0")]);
    }

    #[test]
    fn audience_parses_case_insensitively() {
        assert_eq!("Lead".parse::<Audience>().unwrap(), Audience::Lead);
        assert!("partner".parse::<Audience>().is_err());
    }
}
