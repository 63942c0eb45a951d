//! A flat `KEY=value` file caching remote resource ids between runs.

use crate::errors::{OpenAIError, OpenAIResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl Default for EnvFile {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets `key`, rewriting its existing line in place or appending one.
    /// Other lines, comments included, are kept as they are.
    pub fn update(&self, key: &str, value: &str) -> OpenAIResult<()> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(local_error(&self.path, e)),
        };

        let prefix = format!("{}=", key);
        let line = format!("{}{}", prefix, value);
        let mut found = false;
        let mut lines: Vec<String> = contents
            .lines()
            .map(|existing| {
                if existing.trim_start().starts_with(&prefix) {
                    found = true;
                    line.clone()
                } else {
                    existing.to_string()
                }
            })
            .collect();
        if !found {
            lines.push(line);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        fs::write(&self.path, output).map_err(|e| local_error(&self.path, e))?;
        tracing::debug!(key, path = %self.path.display(), "env file updated");
        Ok(())
    }

    /// Blanks `key`; a blank value reads as absent.
    pub fn clear(&self, key: &str) -> OpenAIResult<()> {
        self.update(key, "")
    }

    /// Loads the file into the process environment, overriding variables
    /// that are already set. A missing file is not an error.
    pub fn load(&self) -> OpenAIResult<()> {
        match dotenvy::from_path_override(&self.path) {
            Ok(()) => Ok(()),
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(OpenAIError::LocalState(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Every non-blank entry of the file.
    pub fn entries(&self) -> OpenAIResult<HashMap<String, String>> {
        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Ok(HashMap::new())
            }
            Err(e) => {
                return Err(OpenAIError::LocalState(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut entries = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                OpenAIError::LocalState(format!("{}: {}", self.path.display(), e))
            })?;
            if !value.is_empty() {
                entries.insert(key, value);
            }
        }
        Ok(entries)
    }

    /// The cached value of `key`; blank values count as absent.
    pub fn get(&self, key: &str) -> OpenAIResult<Option<String>> {
        Ok(self.entries()?.remove(key))
    }
}

fn local_error(path: &Path, err: std::io::Error) -> OpenAIError {
    OpenAIError::LocalState(format!("{}: {}", path.display(), err))
}
