//! Subcommand implementations and the helpers they share.

pub mod diff;
pub mod edit;
pub mod export;
pub mod palette;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use formforge_core::form::{load_form_at, save_form_at};
use formforge_core::{DesignTokenSet, FormDocument};
use formforge_export::config::load_tokens_file;
use formforge_export::{export, load_config, ExportReport, ShellSource};

pub(crate) fn load(path: &Path) -> Result<FormDocument> {
    load_form_at(path).with_context(|| format!("failed to load form '{}'", path.display()))
}

pub(crate) fn save(path: &Path, form: &FormDocument) -> Result<()> {
    save_form_at(path, form).with_context(|| format!("failed to save form '{}'", path.display()))
}

/// Flags shared by `export` and `diff`. Each one overrides `config.yaml`.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Directory the artifact is written to.
    #[arg(long = "out", short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Document shell to compose into (defaults to the built-in shell).
    #[arg(long, value_name = "FILE")]
    pub shell: Option<PathBuf>,

    /// YAML map of design tokens, merged over the configured tokens.
    #[arg(long, value_name = "FILE")]
    pub tokens: Option<PathBuf>,
}

/// Config and flags resolved into the inputs of one export.
#[derive(Debug)]
pub(crate) struct ExportPlan {
    pub shell: ShellSource,
    pub tokens: DesignTokenSet,
    pub out_dir: PathBuf,
    pub title_fallback: String,
}

impl OutputArgs {
    pub(crate) fn plan(&self) -> Result<ExportPlan> {
        let config = load_config().context("failed to load ~/.formforge/config.yaml")?;

        let mut tokens = config.tokens.clone();
        if let Some(path) = &self.tokens {
            let overlay = load_tokens_file(path)
                .with_context(|| format!("failed to load tokens '{}'", path.display()))?;
            tokens.merge(&overlay);
        }

        let shell = match &self.shell {
            Some(path) => ShellSource::File(path.clone()),
            None => config.shell_source(),
        };

        let plan = ExportPlan {
            shell,
            tokens,
            out_dir: self.out_dir.clone().unwrap_or_else(|| config.out_dir()),
            title_fallback: config.title_fallback().to_string(),
        };
        tracing::debug!(
            out_dir = %plan.out_dir.display(),
            tokens = plan.tokens.len(),
            "resolved export plan"
        );
        Ok(plan)
    }
}

/// Run the export pipeline on a single-threaded runtime.
pub(crate) fn run_export(form: &FormDocument, plan: &ExportPlan) -> Result<ExportReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start async runtime")?;
    runtime
        .block_on(export(form, &plan.tokens, &plan.shell, &plan.title_fallback))
        .context("export failed")
}

/// Print skipped fields and shell problems to stderr.
pub(crate) fn print_warnings(report: &ExportReport) {
    for skipped in &report.skipped {
        eprintln!(
            "{} skipped field '{}' ({})",
            "warning:".yellow().bold(),
            skipped.id,
            skipped.reason
        );
    }
    for placeholder in &report.missing_placeholders {
        eprintln!(
            "{} template shell has no {placeholder}; that segment is missing",
            "warning:".yellow().bold()
        );
    }
    for placeholder in &report.duplicate_placeholders {
        eprintln!(
            "{} template shell repeats {placeholder}; only the first was filled",
            "warning:".yellow().bold()
        );
    }
}
