use color_eyre::{
    eyre::{eyre, WrapErr},
    Result, Section,
};
use indicatif::ProgressBar;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Seek},
    path::{Path, PathBuf},
};

/// An input file that was opened and found readable and non-empty.
#[derive(Debug)]
pub struct Source {
    path: PathBuf,
    file: File,
    size: u64,
}

/// Opens every path up front. A single missing, unreadable or empty file fails
/// the whole run before any line is processed.
pub fn open_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Err(eyre!("no input files given"))
            .suggestion("pass one or more files containing one word per line");
    }
    paths.iter().map(|path| Source::open(path)).collect()
}

impl Source {
    fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)
            .wrap_err_with(|| format!("could not open {}", path.display()))?;
        let mut probe = [0; 1];
        let read = file
            .read(&mut probe)
            .wrap_err_with(|| format!("{} is not readable", path.display()))?;
        if read == 0 {
            return Err(eyre!("{} is empty", path.display()))
                .suggestion("word lists must contain at least one line");
        }
        file.rewind()
            .wrap_err_with(|| format!("could not rewind {}", path.display()))?;
        let size = file
            .metadata()
            .wrap_err_with(|| format!("could not stat {}", path.display()))?
            .len();
        Ok(Self {
            path: path.to_owned(),
            file,
            size,
        })
    }

    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Buffered reader over the file that advances `progress` by bytes read.
    pub fn reader(self, progress: &ProgressBar) -> impl BufRead {
        progress.reset();
        progress.set_length(self.size);
        progress.set_message(self.name());
        BufReader::new(progress.wrap_read(self.file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_sources() {
        let err = open_sources(&[]).unwrap_err();
        assert_eq!(err.to_string(), "no input files given");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = open_sources(&[path.clone()]).unwrap_err();
        assert!(err.to_string().contains("could not open"));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_empty_source() -> Result<()> {
        let file = NamedTempFile::new()?;
        let err = open_sources(&[file.path().to_owned()]).unwrap_err();
        assert!(err.to_string().ends_with("is empty"));
        Ok(())
    }

    #[test]
    fn test_one_bad_source_fails_all() -> Result<()> {
        let mut good = NamedTempFile::new()?;
        writeln!(good, "слон")?;
        let empty = NamedTempFile::new()?;
        let result = open_sources(&[good.path().to_owned(), empty.path().to_owned()]);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_probe_does_not_consume() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "слон\nкоты\n")?;
        let mut sources = open_sources(&[file.path().to_owned()])?;
        let source = sources.pop().unwrap();
        assert_eq!(source.size(), "слон\nкоты\n".len() as u64);

        let lines = source
            .reader(&ProgressBar::hidden())
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?;
        assert_eq!(lines, ["слон", "коты"]);
        Ok(())
    }
}
