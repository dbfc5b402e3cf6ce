//! Form editing: `new`, `add`, `remove`, `set`, `show`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use formforge_core::registry;
use formforge_core::{Audience, FieldId, FormDocument, OptionPair, PropValue};

use super::{load, save};

// ---------------------------------------------------------------------------
// new
// ---------------------------------------------------------------------------

/// Create an empty form document.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Path of the form file to create.
    pub form: PathBuf,

    /// Form title; also names the exported file.
    #[arg(long, short = 't')]
    pub title: String,

    /// Backing entity: contact | lead.
    #[arg(long, short = 'a', default_value = "contact")]
    pub audience: Audience,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        if self.form.exists() && !self.force {
            bail!(
                "'{}' already exists; pass --force to overwrite",
                self.form.display()
            );
        }
        let mut form = FormDocument::new(self.title);
        form.audience = self.audience;
        save(&self.form, &form)?;
        println!("✓ Created '{}' ({})", self.form.display(), form.audience);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

/// Place a new field from the palette.
#[derive(Args, Debug)]
pub struct AddArgs {
    pub form: PathBuf,

    /// Field type key, e.g. `email` or `textBlock` (see `formforge palette`).
    #[arg(value_name = "TYPE")]
    pub type_key: String,

    /// Insert before this position instead of appending.
    #[arg(long, value_name = "INDEX")]
    pub at: Option<usize>,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mut form = load(&self.form)?;
        let id = form
            .add_field(&self.type_key, self.at)
            .with_context(|| format!("cannot add '{}'; see `formforge palette`", self.type_key))?;
        save(&self.form, &form)?;
        println!("✓ Added {} field {id}", self.type_key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

/// Remove a field by id.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    pub form: PathBuf,
    pub id: String,
}

impl RemoveArgs {
    pub fn run(self) -> Result<()> {
        let mut form = load(&self.form)?;
        let removed = form
            .remove_field(&FieldId::from(self.id))
            .context("cannot remove field")?;
        save(&self.form, &form)?;
        println!("✓ Removed {} field {}", removed.type_key, removed.id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

/// Set one property on one field.
///
/// The value is parsed like the property's default: `true`/`false` for
/// flags, an integer for counts, a JSON array of `{"value","label"}` objects
/// for option lists, and plain text otherwise.
#[derive(Args, Debug)]
pub struct SetArgs {
    pub form: PathBuf,
    pub id: String,
    #[arg(value_name = "PROP")]
    pub name: String,
    pub value: String,

    /// Store the value as text, skipping type-directed parsing.
    #[arg(long)]
    pub text: bool,
}

impl SetArgs {
    pub fn run(self) -> Result<()> {
        let mut form = load(&self.form)?;
        let id = FieldId::from(self.id);
        let field = form
            .field(&id)
            .with_context(|| format!("no field with id '{id}'"))?;

        // Prefer the registry default's type; fall back to whatever is stored.
        let template = registry::lookup(&field.type_key)
            .and_then(|def| def.defaults.get(&self.name))
            .or_else(|| field.props.get(&self.name))
            .cloned();

        let value = if self.text {
            PropValue::Text(self.value)
        } else {
            parse_prop_value(template.as_ref(), &self.value)
                .with_context(|| format!("invalid value for '{}'", self.name))?
        };

        form.update_field_prop(&id, &self.name, value.clone())?;
        save(&self.form, &form)?;
        println!("✓ {id}.{} = {value}", self.name);
        Ok(())
    }
}

/// Parse `raw` into the same kind of value as `template`.
pub(crate) fn parse_prop_value(template: Option<&PropValue>, raw: &str) -> Result<PropValue> {
    match template {
        Some(PropValue::Bool(_)) => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(PropValue::Bool(true)),
            "false" | "no" | "off" => Ok(PropValue::Bool(false)),
            _ => bail!("expected true or false, got '{raw}' (use --text to store it as text)"),
        },
        Some(PropValue::Int(_)) => raw
            .trim()
            .parse::<i64>()
            .map(PropValue::Int)
            .with_context(|| format!("expected an integer, got '{raw}' (use --text to store it as text)")),
        Some(PropValue::Options(_)) => serde_json::from_str::<Vec<OptionPair>>(raw)
            .map(PropValue::Options)
            .context(r#"expected a JSON array like [{"value":"1","label":"Yes"}]"#),
        Some(PropValue::Text(_)) | None => Ok(PropValue::Text(raw.to_string())),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

/// List the fields of a form in document order.
#[derive(Args, Debug)]
pub struct ShowArgs {
    pub form: PathBuf,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "type")]
    type_key: String,
    #[tabled(rename = "caption")]
    caption: String,
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let form = load(&self.form)?;
        println!("{} ({}, {} fields)", form.title, form.audience, form.fields.len());
        if form.fields.is_empty() {
            println!("No fields yet. Run: formforge add {} <type>", self.form.display());
            return Ok(());
        }

        let rows: Vec<FieldRow> = form
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| FieldRow {
                index,
                id: field.id.to_string(),
                type_key: field.type_key.clone(),
                caption: ["label", "content", "buttonText"]
                    .iter()
                    .find_map(|name| field.props.get(*name))
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_loosely() {
        let t = PropValue::Bool(true);
        assert_eq!(parse_prop_value(Some(&t), "FALSE").unwrap(), PropValue::Bool(false));
        assert_eq!(parse_prop_value(Some(&t), "yes").unwrap(), PropValue::Bool(true));
        assert!(parse_prop_value(Some(&t), "maybe").is_err());
    }

    #[test]
    fn integers_accept_negative_values() {
        let t = PropValue::Int(100);
        assert_eq!(parse_prop_value(Some(&t), "-5").unwrap(), PropValue::Int(-5));
        assert!(parse_prop_value(Some(&t), "ten").is_err());
    }

    #[test]
    fn options_parse_from_json() {
        let t = PropValue::Options(vec![]);
        let parsed = parse_prop_value(Some(&t), r#"[{"value":"a","label":"A"}]"#).unwrap();
        assert_eq!(parsed.as_options(), &[OptionPair::new("a", "A")]);
        assert!(parse_prop_value(Some(&t), "a,b").is_err());
    }

    #[test]
    fn unknown_props_are_text() {
        assert_eq!(parse_prop_value(None, "42").unwrap(), PropValue::from("42"));
    }
}
