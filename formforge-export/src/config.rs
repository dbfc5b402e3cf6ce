//! User configuration at `~/.formforge/config.yaml`.
//!
//! ```yaml
//! shell: /srv/forms/wrapper.html  # optional, embedded shell otherwise
//! out_dir: ./dist                 # optional, current directory otherwise
//! title_fallback: Untitled Form   # optional, "Marketing Form" otherwise
//! tokens:
//!   --primary-color: "#0078d4"
//!   --border-radius: 4px
//! ```
//!
//! Each loader has two forms:
//! - `fn(…)_at(home, …)`: explicit home root (used by tests)
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use formforge_core::DesignTokenSet;

use crate::compose::DEFAULT_TITLE;
use crate::error::{io_err, ExportError};
use crate::shell::ShellSource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shell: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub title_fallback: Option<String>,
    pub tokens: DesignTokenSet,
}

impl Config {
    pub fn shell_source(&self) -> ShellSource {
        ShellSource::from_path(self.shell.clone())
    }

    pub fn title_fallback(&self) -> &str {
        self.title_fallback
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `<home>/.formforge/config.yaml`
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".formforge").join("config.yaml")
}

/// Load the config under `home`. A missing file yields [`Config::default`].
pub fn load_config_at(home: &Path) -> Result<Config, ExportError> {
    let path = config_path_at(home);
    let Some(contents) = read_optional(&path)? else {
        return Ok(Config::default());
    };
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ExportError::Config { path, source })
}

/// Load the config under the user's home directory.
pub fn load_config() -> Result<Config, ExportError> {
    let home = dirs::home_dir().ok_or(ExportError::HomeNotFound)?;
    load_config_at(&home)
}

/// Load a standalone token file: a YAML map of property name to value.
pub fn load_tokens_file(path: &Path) -> Result<DesignTokenSet, ExportError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(DesignTokenSet::new());
    }
    serde_yaml::from_str(&contents).map_err(|source| ExportError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(home: &Path, yaml: &str) {
        let path = config_path_at(home);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let home = TempDir::new().unwrap();
        let config = load_config_at(home.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.shell_source(), ShellSource::Embedded);
        assert_eq!(config.title_fallback(), "Marketing Form");
        assert_eq!(config.out_dir(), PathBuf::from("."));
    }

    #[test]
    fn full_config_is_read() {
        let home = TempDir::new().unwrap();
        write_config(
            home.path(),
            "shell: /srv/wrapper.html\nout_dir: dist\ntitle_fallback: Untitled\ntokens:\n  --b: red\n  --a: 1px\n",
        );
        let config = load_config_at(home.path()).unwrap();
        assert_eq!(
            config.shell_source(),
            ShellSource::File(PathBuf::from("/srv/wrapper.html"))
        );
        assert_eq!(config.out_dir(), PathBuf::from("dist"));
        assert_eq!(config.title_fallback(), "Untitled");
        let tokens: Vec<_> = config.tokens.iter().collect();
        assert_eq!(tokens, vec![("--b", "red"), ("--a", "1px")]);
    }

    #[test]
    fn blank_title_fallback_is_ignored() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), "title_fallback: '  '\n");
        assert_eq!(load_config_at(home.path()).unwrap().title_fallback(), "Marketing Form");
    }

    #[test]
    fn empty_file_gives_defaults() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), "");
        assert_eq!(load_config_at(home.path()).unwrap(), Config::default());
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), "tokens: [unclosed\n");
        let err = load_config_at(home.path()).unwrap_err();
        assert!(matches!(err, ExportError::Config { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn token_file_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.yaml");
        std::fs::write(&path, "--z: '0'\n--y: '#fff'\n").unwrap();
        let tokens = load_tokens_file(&path).unwrap();
        let entries: Vec<_> = tokens.iter().collect();
        assert_eq!(entries, vec![("--z", "0"), ("--y", "#fff")]);
    }
}
