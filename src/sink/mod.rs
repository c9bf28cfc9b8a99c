//! Writers that hand a finished [`Dataset`] to storage.

use crate::records::Dataset;
use clap::ValueEnum;
use color_eyre::{eyre::WrapErr, Result};
use serde::Deserialize;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

mod json;
mod sql;

pub trait RecordSink {
    fn write(&mut self, dataset: &Dataset) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// PostgreSQL script that recreates the word and rating tables
    #[default]
    Sql,
    /// Pretty printed JSON document
    Json,
}

impl Format {
    pub fn render(self, dataset: &Dataset, out: impl Write) -> Result<()> {
        match self {
            Format::Sql => sql::write_script(dataset, out)?,
            Format::Json => json::write_document(dataset, out)?,
        }
        Ok(())
    }
}

/// Renders a dataset into a file, or to stdout for `-`.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: Format,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn is_stdout(&self) -> bool {
        self.path == Path::new("-")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    /// The target file is replaced atomically, so an interrupted run never
    /// leaves a half written output behind.
    fn write(&mut self, dataset: &Dataset) -> Result<()> {
        if self.is_stdout() {
            return self.format.render(dataset, io::stdout().lock());
        }

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("could not create {}", parent.display()))?;
        let temp_file = NamedTempFile::new_in(parent)
            .wrap_err_with(|| format!("could not create a temporary file in {}", parent.display()))?;

        let mut writer = BufWriter::new(&temp_file);
        self.format
            .render(dataset, &mut writer)
            .wrap_err_with(|| format!("could not write {}", self.path.display()))?;
        writer.flush()?;
        drop(writer);

        temp_file
            .persist(&self.path)
            .wrap_err_with(|| format!("could not replace {}", self.path.display()))?;
        Ok(())
    }
}
