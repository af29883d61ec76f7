use crate::error::Error;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Append-only transcript file. Every line is flushed as soon as it is written, so a run that
/// stops early still leaves a valid prefix behind. The file is released on drop.
#[derive(Debug)]
pub struct Transcript {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Transcript {
    /// Creates (or truncates) the transcript at `path`, creating missing parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        debug!(path = %path.display(), "transcript opened");

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn write_line<S: AsRef<str>>(&mut self, line: S) -> Result<(), Error> {
        self.writer.write_all(line.as_ref().as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        debug!(path = %self.path.display(), "transcript closed");

        Ok(())
    }
}
