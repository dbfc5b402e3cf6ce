//! `formforge diff`: show the unified diff of what export would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use formforge_export::diff_export;

use super::{load, print_warnings, run_export, OutputArgs};

/// Arguments for `formforge diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    pub form: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let form = load(&self.form)?;
        let plan = self.output.plan()?;
        let report = run_export(&form, &plan)?;
        print_warnings(&report);

        let diff = diff_export(&report, &plan.out_dir)
            .with_context(|| format!("diff failed for '{}'", report.filename))?;

        if diff.is_empty() {
            println!("No differences for '{}'.", report.filename);
            return Ok(());
        }

        print!("{}", diff.unified_diff);
        if !diff.unified_diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
