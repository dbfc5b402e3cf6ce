//! Dry-run unified diff support for `formforge diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::ExportError;
use crate::pipeline::ExportReport;
use crate::writer::{normalize_line_endings, read_existing};

/// Difference between an export and the artifact currently on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDiff {
    pub path: PathBuf,
    /// Empty when the artifact is already up to date.
    pub unified_diff: String,
}

impl ExportDiff {
    pub fn is_empty(&self) -> bool {
        self.unified_diff.is_empty()
    }
}

/// Compare what `report` would deliver into `out_dir` against the current
/// artifact. A missing artifact diffs against empty content.
///
/// No files are written.
pub fn diff_export(report: &ExportReport, out_dir: &Path) -> Result<ExportDiff, ExportError> {
    let path = out_dir.join(&report.filename);
    let rendered = normalize_line_endings(&report.document);
    let existing = read_existing(&path)?.unwrap_or_default();

    if existing == rendered {
        return Ok(ExportDiff {
            path,
            unified_diff: String::new(),
        });
    }

    let old_header = format!("a/{}", report.filename);
    let new_header = format!("b/{}", report.filename);
    let unified_diff = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(ExportDiff { path, unified_diff })
}
