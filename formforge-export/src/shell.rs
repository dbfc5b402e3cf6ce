//! Document shell loading.

use std::path::PathBuf;

use crate::error::ExportError;

/// Shell compiled into the binary, used when no shell file is configured.
pub const EMBEDDED_SHELL: &str = include_str!("templates/form-wrapper.html");

/// Where the document shell comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShellSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl ShellSource {
    /// `File` when a path is given, otherwise the embedded shell.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(ShellSource::Embedded, ShellSource::File)
    }
}

/// Read the shell. Every call performs its own read; nothing is cached.
pub async fn load_shell(source: &ShellSource) -> Result<String, ExportError> {
    match source {
        ShellSource::Embedded => Ok(EMBEDDED_SHELL.to_string()),
        ShellSource::File(path) => {
            let shell = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ExportError::TemplateLoad {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!(path = %path.display(), bytes = shell.len(), "loaded template shell");
            Ok(shell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Placeholder;

    #[test]
    fn embedded_shell_has_each_placeholder_once() {
        for p in Placeholder::all() {
            assert_eq!(EMBEDDED_SHELL.matches(p.token()).count(), 1, "{p}");
        }
    }

    #[tokio::test]
    async fn embedded_source_needs_no_io() {
        let shell = load_shell(&ShellSource::Embedded).await.unwrap();
        assert_eq!(shell, EMBEDDED_SHELL);
    }

    #[tokio::test]
    async fn file_source_reads_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shell.html");
        std::fs::write(&path, "<title>{{FORM_TITLE}}</title>").unwrap();
        let shell = load_shell(&ShellSource::File(path)).await.unwrap();
        assert_eq!(shell, "<title>{{FORM_TITLE}}</title>");
    }

    #[tokio::test]
    async fn missing_file_is_a_template_load_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.html");
        let err = load_shell(&ShellSource::File(path.clone())).await.unwrap_err();
        assert!(matches!(err, ExportError::TemplateLoad { path: ref p, .. } if *p == path));
    }
}
