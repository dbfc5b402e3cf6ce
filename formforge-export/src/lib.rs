//! # formforge-export
//!
//! Design-token compilation, template composition and artifact delivery.
//!
//! Call [`export`] to turn a [`FormDocument`](formforge_core::FormDocument)
//! into a complete HTML document, then [`deliver`] to write it, or
//! [`diff_export`] to preview the change.

pub mod compose;
pub mod config;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod shell;
pub mod tokens;
pub mod writer;

pub use compose::{compose, Composition, Placeholder};
pub use config::{load_config, load_config_at, Config};
pub use diff::{diff_export, ExportDiff};
pub use error::ExportError;
pub use pipeline::{export, export_filename, ExportReport, SkippedField};
pub use shell::{load_shell, ShellSource};
pub use writer::{deliver, WriteResult};
