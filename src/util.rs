use anyhow::{anyhow, Result};
use std::fs::File;
use std::path::Path;

pub fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}

/// Reads a whole YAML file into `T`. An empty file is treated like an empty
/// mapping, so `T`'s defaults apply.
pub fn read_yaml<T>(path: &Path, kind: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    use std::io::Read;
    let mut contents = String::new();
    open(path, kind)?.read_to_string(&mut contents)?;
    let contents = match contents.trim().is_empty() {
        true => "{}",
        false => contents.as_str(),
    };
    serde_yaml::from_str(contents)
        .map_err(|e| anyhow!("Parsing {} file `{}`: {}", kind, path.display(), e))
}
