//! Caller input checks that end the run with a warning instead of an error.

use log::{error, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Non-fatal input problem reported to the user before any model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    MissingFile(PathBuf),
    Unreadable { path: PathBuf, reason: String },
    EmptyDatabase,
    EmptyQuery,
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputWarning::MissingFile(path) => {
                write!(f, "❌ No se encontró el archivo: {}", path.display())
            }
            InputWarning::Unreadable { path, reason } => {
                write!(f, "❌ No se pudo leer el archivo {}: {reason}", path.display())
            }
            InputWarning::EmptyDatabase => f.write_str("⚠️ La base de datos está vacía."),
            InputWarning::EmptyQuery => f.write_str("⚠️ La consulta del usuario está vacía."),
        }
    }
}

/// Database file contents, read once and trimmed.
#[derive(Debug, Clone)]
pub struct DatabaseFile {
    pub path: PathBuf,
    pub contents: String,
}

impl DatabaseFile {
    /// Read the database, reporting missing, unreadable, or blank files.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, InputWarning> {
        let path = path.as_ref();
        if !path.exists() {
            error!("database file not found: {}", path.display());
            return Err(InputWarning::MissingFile(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|err| {
            error!("failed to read database {}: {err}", path.display());
            InputWarning::Unreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;

        let contents = contents.trim();
        if contents.is_empty() {
            warn!("database is empty: {}", path.display());
            return Err(InputWarning::EmptyDatabase);
        }

        Ok(Self {
            path: path.to_path_buf(),
            contents: contents.to_string(),
        })
    }
}
