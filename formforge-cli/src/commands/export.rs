//! `formforge export`: compose the HTML document and write it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use formforge_export::{deliver, WriteResult};

use super::{load, print_warnings, run_export, OutputArgs};

/// Arguments for `formforge export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    pub form: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Show what would be written without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    pub fn run(self) -> Result<()> {
        let form = load(&self.form)?;
        let plan = self.output.plan()?;
        let report = run_export(&form, &plan)?;
        print_warnings(&report);

        let result = deliver(&report.document, &report.filename, &plan.out_dir, self.dry_run)
            .with_context(|| format!("failed to write '{}'", report.filename))?;

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        let fields = format!(
            "{} field{}",
            report.rendered,
            if report.rendered == 1 { "" } else { "s" }
        );
        match result {
            WriteResult::Written { path } => {
                println!("{prefix}✓ Exported '{}' ({fields})", report.filename);
                println!("  ✎  {}", path.display());
            }
            WriteResult::WouldWrite { path } => {
                println!("{prefix}✓ Would export '{}' ({fields})", report.filename);
                println!("  ~  {}", path.display());
            }
            WriteResult::Unchanged { path } => {
                println!("{prefix}✓ '{}' is up to date", report.filename);
                println!("  ·  {}", path.display());
            }
        }
        Ok(())
    }
}
