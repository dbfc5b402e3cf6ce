//! Field-type registry: the fixed palette of field kinds.
//!
//! # Catalogue
//!
//! | key         | editor block type    | wrapper class             | category  |
//! |-------------|----------------------|---------------------------|-----------|
//! | `text`      | `TextFormField`      | `textFormFieldBlock`      | input     |
//! | `email`     | `TextFormField`      | `textFormFieldBlock`      | input     |
//! | `phone`     | `TextFormField`      | `phoneFormFieldBlock`     | input     |
//! | `textarea`  | `TextAreaFormField`  | `textFormFieldBlock`      | input     |
//! | `datetime`  | `DateTimeFormField`  | `dateTimeFormFieldBlock`  | input     |
//! | `dropdown`  | `OptionSetFormField` | `optionSetFormFieldBlock` | selection |
//! | `checkbox`  | `TwoOptionFormField` | `twoOptionFormFieldBlock` | selection |
//! | `radio`     | `TwoOptionFormField` | `twoOptionFormFieldBlock` | selection |
//! | `consent`   | `Consent`            | `consentBlock`            | consent   |
//! | `textBlock` | `Text`               | none                      | layout    |
//! | `divider`   | `Divider`            | `dividerWrapper`          | layout    |
//! | `submit`    | `SubmitButton`       | `submitButtonWrapper`     | layout    |
//!
//! The table is built once per process on first access and is read-only
//! afterwards. Definitions are handed out by shared reference; callers that
//! need a mutable bag clone it.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;

use crate::types::{Audience, OptionPair, PropValue, PropertyBag};

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Closed set of field variants. Render dispatch matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    TextArea,
    DateTime,
    Dropdown,
    Checkbox,
    Radio,
    Consent,
    TextBlock,
    Divider,
    Submit,
}

impl FieldKind {
    /// All variants in palette declaration order.
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::Text,
            FieldKind::Email,
            FieldKind::Phone,
            FieldKind::TextArea,
            FieldKind::DateTime,
            FieldKind::Dropdown,
            FieldKind::Checkbox,
            FieldKind::Radio,
            FieldKind::Consent,
            FieldKind::TextBlock,
            FieldKind::Divider,
            FieldKind::Submit,
        ]
    }

    /// Registry key as stored in form files.
    pub fn key(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::TextArea => "textarea",
            FieldKind::DateTime => "datetime",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Consent => "consent",
            FieldKind::TextBlock => "textBlock",
            FieldKind::Divider => "divider",
            FieldKind::Submit => "submit",
        }
    }

    pub fn from_key(key: &str) -> Option<FieldKind> {
        FieldKind::all().iter().copied().find(|k| k.key() == key)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Palette grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Input,
    Selection,
    Consent,
    Layout,
}

impl Category {
    /// Categories in palette order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Input,
            Category::Selection,
            Category::Consent,
            Category::Layout,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Category::Input => "input",
            Category::Selection => "selection",
            Category::Consent => "consent",
            Category::Layout => "layout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Input => "Input Fields",
            Category::Selection => "Selection",
            Category::Consent => "Consent",
            Category::Layout => "Layout",
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        Category::all().iter().copied().find(|c| c.id() == id)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_id(&s.to_ascii_lowercase()).ok_or_else(|| {
            let ids: Vec<&str> = Category::all().iter().map(|c| c.id()).collect();
            format!("unknown category '{s}'; expected: {}", ids.join(", "))
        })
    }
}

// ---------------------------------------------------------------------------
// FieldTypeDefinition
// ---------------------------------------------------------------------------

/// Immutable description of one field variant.
///
/// The render rule itself lives in `formforge-renderer`, selected by `kind`.
#[derive(Debug, Clone)]
pub struct FieldTypeDefinition {
    pub kind: FieldKind,
    pub key: &'static str,
    /// Value of `data-editorblocktype` in the exported markup.
    pub block_type: &'static str,
    /// Wrapper element class; empty for bare layout blocks.
    pub css_class: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: Category,
    pub defaults: PropertyBag,
}

// ---------------------------------------------------------------------------
// FieldTypeRegistry
// ---------------------------------------------------------------------------

/// Read-only catalogue of every [`FieldTypeDefinition`], in declaration order.
#[derive(Debug)]
pub struct FieldTypeRegistry {
    definitions: Vec<FieldTypeDefinition>,
}

impl FieldTypeRegistry {
    fn build() -> Self {
        let definitions = FieldKind::all().iter().map(|k| definition_for(*k)).collect();
        Self { definitions }
    }

    /// Definition for a type key, or `None` if the key is not registered.
    pub fn lookup(&self, key: &str) -> Option<&FieldTypeDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    /// Definition for a kind. Every kind is registered.
    pub fn get(&self, kind: FieldKind) -> &FieldTypeDefinition {
        // `build` emits one definition per `FieldKind::all()` entry, in order.
        let idx = FieldKind::all()
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.definitions[idx]
    }

    pub fn categories(&self) -> &'static [Category] {
        Category::all()
    }

    /// `(key, definition)` pairs of one category, in declaration order.
    pub fn types_in_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (&'static str, &FieldTypeDefinition)> + '_ {
        self.definitions
            .iter()
            .filter(move |d| d.category == category)
            .map(|d| (d.key, d))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldTypeDefinition> {
        self.definitions.iter()
    }
}

static REGISTRY: OnceLock<FieldTypeRegistry> = OnceLock::new();

/// The process-wide registry.
pub fn registry() -> &'static FieldTypeRegistry {
    REGISTRY.get_or_init(FieldTypeRegistry::build)
}

/// Shorthand for `registry().lookup(key)`.
pub fn lookup(key: &str) -> Option<&'static FieldTypeDefinition> {
    registry().lookup(key)
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

fn bag<const N: usize>(entries: [(&str, PropValue); N]) -> PropertyBag {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn options(pairs: &[(&str, &str)]) -> PropValue {
    PropValue::Options(pairs.iter().map(|(v, l)| OptionPair::new(*v, *l)).collect())
}

fn definition_for(kind: FieldKind) -> FieldTypeDefinition {
    let (block_type, css_class, label, icon, category, defaults) = match kind {
        FieldKind::Text => (
            "TextFormField",
            "textFormFieldBlock",
            "Text",
            "📝",
            Category::Input,
            bag([
                ("label", "Text Field".into()),
                ("placeholder", "".into()),
                ("logicalName", "".into()),
                ("required", false.into()),
                ("prefill", true.into()),
                ("maxLength", PropValue::Int(100)),
            ]),
        ),
        FieldKind::Email => (
            "TextFormField",
            "textFormFieldBlock",
            "Email",
            "✉️",
            Category::Input,
            bag([
                ("label", "Email".into()),
                ("placeholder", "Enter your email address".into()),
                ("logicalName", "emailaddress1".into()),
                ("required", true.into()),
                ("prefill", true.into()),
            ]),
        ),
        FieldKind::Phone => (
            "TextFormField",
            "phoneFormFieldBlock",
            "Phone",
            "📱",
            Category::Input,
            bag([
                ("label", "Phone Number".into()),
                ("placeholder", "Enter your phone number".into()),
                ("logicalName", "mobilephone".into()),
                ("required", false.into()),
                ("prefill", true.into()),
            ]),
        ),
        FieldKind::TextArea => (
            "TextAreaFormField",
            "textFormFieldBlock",
            "Text Area",
            "📄",
            Category::Input,
            bag([
                ("label", "Message".into()),
                ("placeholder", "".into()),
                ("logicalName", "description".into()),
                ("required", false.into()),
                ("prefill", true.into()),
                ("rows", PropValue::Int(5)),
                ("maxLength", PropValue::Int(2000)),
            ]),
        ),
        FieldKind::DateTime => (
            "DateTimeFormField",
            "dateTimeFormFieldBlock",
            "Date/Time",
            "📅",
            Category::Input,
            bag([
                ("label", "Date".into()),
                ("placeholder", "Select date".into()),
                ("logicalName", "".into()),
                ("required", false.into()),
                ("prefill", true.into()),
            ]),
        ),
        FieldKind::Dropdown => (
            "OptionSetFormField",
            "optionSetFormFieldBlock",
            "Dropdown",
            "▼",
            Category::Selection,
            bag([
                ("label", "Select Option".into()),
                ("logicalName", "".into()),
                ("required", false.into()),
                ("prefill", true.into()),
                (
                    "options",
                    options(&[("1", "Option 1"), ("2", "Option 2"), ("3", "Option 3")]),
                ),
            ]),
        ),
        FieldKind::Checkbox => (
            "TwoOptionFormField",
            "twoOptionFormFieldBlock",
            "Checkbox",
            "☑️",
            Category::Selection,
            bag([
                ("label", "I agree".into()),
                ("logicalName", "".into()),
                ("required", false.into()),
                ("prefill", true.into()),
                ("options", options(&[("1", "Yes"), ("0", "No")])),
            ]),
        ),
        FieldKind::Radio => (
            "TwoOptionFormField",
            "twoOptionFormFieldBlock",
            "Radio Buttons",
            "⚪",
            Category::Selection,
            bag([
                ("label", "Choose one".into()),
                ("logicalName", "".into()),
                ("required", false.into()),
                ("prefill", true.into()),
                ("options", options(&[("1", "Yes"), ("0", "No")])),
                ("defaultValue", "0".into()),
            ]),
        ),
        FieldKind::Consent => (
            "Consent",
            "consentBlock",
            "Consent",
            "✅",
            Category::Consent,
            bag([
                ("label", "I agree to receive communications".into()),
                ("required", true.into()),
                (
                    "complianceSettingsId",
                    "00000000-0000-0000-0000-000000000000".into(),
                ),
                ("complianceSettingsName", "Default".into()),
                ("purposeId", "10000000-0000-0000-0000-000000000003".into()),
                ("purposeName", "Commercial".into()),
                ("channels", "Email".into()),
                ("optInWhenChecked", true.into()),
                ("prefill", true.into()),
            ]),
        ),
        FieldKind::TextBlock => (
            "Text",
            "",
            "Text Block",
            "🔤",
            Category::Layout,
            bag([
                ("content", "Enter your text here".into()),
                ("tag", "p".into()),
                ("align", "center".into()),
            ]),
        ),
        FieldKind::Divider => (
            "Divider",
            "dividerWrapper",
            "Divider",
            "➖",
            Category::Layout,
            bag([("color", "#e1dfdd".into()), ("thickness", PropValue::Int(2))]),
        ),
        FieldKind::Submit => (
            "SubmitButton",
            "submitButtonWrapper",
            "Submit Button",
            "🔘",
            Category::Layout,
            bag([("buttonText", "Submit".into())]),
        ),
    };

    FieldTypeDefinition {
        kind,
        key: kind.key(),
        block_type,
        css_class,
        label,
        icon,
        category,
        defaults,
    }
}

// ---------------------------------------------------------------------------
// Logical-name suggestions
// ---------------------------------------------------------------------------

/// A suggested backing-entity column for the `logicalName` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogicalName {
    pub value: &'static str,
    pub label: &'static str,
}

const fn ln(value: &'static str, label: &'static str) -> LogicalName {
    LogicalName { value, label }
}

const CONTACT_NAMES: &[LogicalName] = &[
    ln("firstname", "First Name"),
    ln("lastname", "Last Name"),
    ln("emailaddress1", "Email"),
    ln("mobilephone", "Mobile Phone"),
    ln("telephone1", "Business Phone"),
    ln("jobtitle", "Job Title"),
    ln("companyname", "Company Name"),
    ln("address1_city", "City"),
    ln("address1_country", "Country"),
    ln("description", "Description"),
];

const LEAD_NAMES: &[LogicalName] = &[
    ln("firstname", "First Name"),
    ln("lastname", "Last Name"),
    ln("emailaddress1", "Email"),
    ln("mobilephone", "Mobile Phone"),
    ln("telephone1", "Business Phone"),
    ln("jobtitle", "Job Title"),
    ln("companyname", "Company Name"),
    ln("subject", "Topic"),
    ln("description", "Description"),
];

/// Logical-name suggestions for an audience.
pub fn logical_names(audience: Audience) -> &'static [LogicalName] {
    match audience {
        Audience::Contact => CONTACT_NAMES,
        Audience::Lead => LEAD_NAMES,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
