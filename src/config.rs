//! Optional JSON configuration.
//!
//! ```json
//! {
//!   "output": { "format": "sql", "path": "words.sql" },
//!   "summary": { "top": 5 }
//! }
//! ```
//!
//! Every field may be omitted. Command line flags override the file.

use crate::sink::Format;
use color_eyre::{eyre::WrapErr, Result, Section};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG: &str = "wordstat.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File the config was read from, `None` for defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
    pub output: OutputConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Format,
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Sql,
            path: PathBuf::from("words.sql"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// How many top scoring words per length to print after a run.
    pub top: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { top: 5 }
    }
}

impl Config {
    /// Loads `explicit` if given, which then has to exist. Otherwise
    /// [`DEFAULT_CONFIG`] is used when present, and defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read config {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid config {}", path.display()))
            .suggestion("see the config module docs for the accepted keys")?;
        config.source = Some(path.to_owned());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, Format::Sql);
        assert_eq!(config.output.path, Path::new("words.sql"));
        assert_eq!(config.summary.top, 5);
        assert_eq!(config.source, None);
    }

    #[test]
    fn test_partial_file() -> Result<()> {
        let file = write_config(r#"{ "output": { "format": "json" } }"#)?;
        let config = Config::load(Some(file.path()))?;
        assert_eq!(config.output.format, Format::Json);
        assert_eq!(config.output.path, Path::new("words.sql"));
        assert_eq!(config.summary.top, 5);
        assert_eq!(config.source.as_deref(), Some(file.path()));
        Ok(())
    }

    #[test]
    fn test_full_file() -> Result<()> {
        let file = write_config(
            r#"{ "output": { "format": "sql", "path": "out/db.sql" }, "summary": { "top": 0 } }"#,
        )?;
        let config = Config::from_file(file.path())?;
        assert_eq!(config.output.path, Path::new("out/db.sql"));
        assert_eq!(config.summary.top, 0);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_keys() -> Result<()> {
        let file = write_config(r#"{ "db": { "host": "localhost" } }"#)?;
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid config"));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.json"))).is_err());
    }
}
