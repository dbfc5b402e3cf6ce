//! formforge: build CRM marketing forms from a field palette and export them
//! as self-contained HTML.
//!
//! # Usage
//!
//! ```text
//! formforge new <form.yaml> --title <title> [--audience contact|lead] [--force]
//! formforge add <form.yaml> <type> [--at <index>]
//! formforge remove <form.yaml> <field-id>
//! formforge set <form.yaml> <field-id> <prop> <value> [--text]
//! formforge show <form.yaml>
//! formforge palette [--json]
//! formforge names [--audience contact|lead | --form <form.yaml>]
//! formforge render <form.yaml> [--field <field-id>]
//! formforge export <form.yaml> [--out <dir>] [--shell <file>] [--tokens <file>] [--dry-run]
//! formforge diff <form.yaml> [--out <dir>] [--shell <file>] [--tokens <file>]
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-field detail.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs,
    edit::{AddArgs, NewArgs, RemoveArgs, SetArgs, ShowArgs},
    export::ExportArgs,
    palette::{NamesArgs, PaletteArgs},
    render::RenderArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "formforge",
    version,
    about = "Assemble CRM marketing forms and export them as HTML",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty form document.
    New(NewArgs),

    /// Place a new field from the palette.
    Add(AddArgs),

    /// Remove a field by id.
    Remove(RemoveArgs),

    /// Set one property on one field.
    Set(SetArgs),

    /// List the fields of a form in document order.
    Show(ShowArgs),

    /// List every field type, grouped by category.
    Palette(PaletteArgs),

    /// List suggested logical names for an audience.
    Names(NamesArgs),

    /// Print the markup of a form's fields.
    Render(RenderArgs),

    /// Compose the full HTML document and write it.
    Export(ExportArgs),

    /// Show a unified diff of what export would write.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::New(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::Remove(args) => args.run(),
        Commands::Set(args) => args.run(),
        Commands::Show(args) => args.run(),
        Commands::Palette(args) => args.run(),
        Commands::Names(args) => args.run(),
        Commands::Render(args) => args.run(),
        Commands::Export(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
