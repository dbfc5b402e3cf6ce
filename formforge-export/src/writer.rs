//! Artifact delivery.
//!
//! ## `deliver` protocol
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 hash the document.
//! 3. Hash the current artifact, if any → skip if identical.
//! 4. Write to `<path>.formforge.tmp`.
//! 5. Rename to the final path (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, ExportError};

/// Outcome of delivering one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: the artifact on disk already has this content.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Write `document` to `out_dir/filename`.
pub fn deliver(
    document: &str,
    filename: &str,
    out_dir: &Path,
    dry_run: bool,
) -> Result<WriteResult, ExportError> {
    let path = out_dir.join(filename);
    let tmp = PathBuf::from(format!("{}.formforge.tmp", path.display()));
    deliver_with_tmp(&path, document, dry_run, &tmp)
}

fn deliver_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, ExportError> {
    let normalized = normalize_line_endings(content);
    let content = normalized.as_str();

    let digest = sha256_hex(content);
    if let Some(existing) = read_existing(path)? {
        if sha256_hex(&existing) == digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current artifact content with LF line endings, or `None` if absent.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(normalize_line_endings(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

fn sha256_hex(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let result = deliver("<html></html>", "form.html", tmp.path(), false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(result.path(), tmp.path().join("form.html"));
        assert!(tmp.path().join("form.html").exists());
    }

    #[test]
    fn second_write_same_content_returns_unchanged() {
        let tmp = TempDir::new().unwrap();
        deliver("same", "f.html", tmp.path(), false).unwrap();
        let result = deliver("same", "f.html", tmp.path(), false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        deliver("v1", "f.html", tmp.path(), false).unwrap();
        let result = deliver("v2", "f.html", tmp.path(), false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(tmp.path().join("f.html")).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let result = deliver("content", "nope.html", tmp.path(), true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!tmp.path().join("nope.html").exists(), "dry-run must not create files");
    }

    #[test]
    fn dry_run_reports_unchanged_when_identical() {
        let tmp = TempDir::new().unwrap();
        deliver("content", "f.html", tmp.path(), false).unwrap();
        let result = deliver("content", "f.html", tmp.path(), true).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        deliver("data", "clean.html", tmp.path(), false).unwrap();
        assert!(!tmp.path().join("clean.html.formforge.tmp").exists());
    }

    #[test]
    fn creates_output_directory() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dist").join("forms");
        deliver("content", "f.html", &out, false).unwrap();
        assert!(out.join("f.html").exists());
    }

    #[test]
    fn unchanged_write_preserves_mtime() {
        let tmp = TempDir::new().unwrap();
        deliver("stable", "f.html", tmp.path(), false).unwrap();
        let target = tmp.path().join("f.html");
        let mtime_1 = fs::metadata(&target).unwrap().modified().unwrap();

        sleep(Duration::from_millis(1100));
        deliver("stable", "f.html", tmp.path(), false).unwrap();
        let mtime_2 = fs::metadata(&target).unwrap().modified().unwrap();
        assert_eq!(mtime_2, mtime_1, "mtime changed; file was rewritten");
    }

    #[test]
    fn crlf_and_lf_content_share_the_same_hash() {
        let tmp = TempDir::new().unwrap();
        let first = deliver("line1\r\nline2\r\n", "n.html", tmp.path(), false).unwrap();
        assert!(matches!(first, WriteResult::Written { .. }));

        let second = deliver("line1\nline2\n", "n.html", tmp.path(), false).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));

        let disk = fs::read_to_string(tmp.path().join("n.html")).unwrap();
        assert_eq!(disk, "line1\nline2\n");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("form.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("form.html.formforge.tmp");

        let result = deliver_with_tmp(&path, "new content", false, &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only check when the rename failed.
        if result.is_err() {
            let current = fs::read_to_string(&path).unwrap();
            assert_eq!(current, "original", "original file should be intact");
            assert!(!tmp_path.exists(), ".formforge.tmp should be cleaned up");
        }
    }
}
