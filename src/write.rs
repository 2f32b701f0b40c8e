//! Writes rendered documents to disk.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// A rendered document and the file name it should be written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// The file name, relative to the output directory.
    pub name: String,

    pub contents: String,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, contents: String) -> OutputFile {
        OutputFile {
            name: name.into(),
            contents,
        }
    }
}

/// Writes each file into `directory` (created if missing) as UTF-8,
/// overwriting whatever is there. Stops at the first failure; files written
/// before it stay on disk. Returns the paths written, in order.
pub fn write_outputs(directory: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory).map_err(|err| Error {
        path: directory.to_owned(),
        err,
    })?;

    files
        .iter()
        .map(|file| {
            let path = directory.join(&file.name);
            std::fs::write(&path, file.contents.as_bytes()).map_err(|err| Error {
                path: path.clone(),
                err,
            })?;
            info!(path = %path.display(), bytes = file.contents.len(), "wrote file");
            Ok(path)
        })
        .collect()
}

/// The result of a fallible output-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to write an output file or create its directory.
#[derive(Debug)]
pub struct Error {
    pub path: PathBuf,
    pub err: io::Error,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Writing '{}': {}", self.path.display(), self.err)
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}
