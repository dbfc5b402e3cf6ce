//! `formforge render`: print field markup without composing a document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use formforge_core::FieldId;
use formforge_renderer::Renderer;

use super::load;

/// Print the markup of a form's fields.
#[derive(Args, Debug)]
pub struct RenderArgs {
    pub form: PathBuf,

    /// Render only this field.
    #[arg(long, value_name = "ID")]
    pub field: Option<String>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let form = load(&self.form)?;
        let renderer = Renderer::new();

        if let Some(id) = self.field {
            let id = FieldId::from(id);
            let field = form
                .field(&id)
                .with_context(|| format!("no field with id '{id}'"))?;
            let markup = renderer
                .render(field)
                .with_context(|| format!("cannot render field '{id}'"))?;
            print!("{markup}");
            return Ok(());
        }

        for field in &form.fields {
            match renderer.render(field) {
                Ok(markup) => print!("{markup}"),
                Err(err) => eprintln!("{} {err}", "warning:".yellow().bold()),
            }
        }
        Ok(())
    }
}
