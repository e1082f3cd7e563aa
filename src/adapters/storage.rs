use crate::domain::model::Student;
use crate::domain::ports::RecordStore;
use crate::utils::error::{Result, RosterError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps the whole roster in one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, message: impl std::fmt::Display) -> RosterError {
        RosterError::StoreError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Student>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No store file at {}, starting empty", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.store_error(e)),
        };

        if content.trim().is_empty() {
            tracing::warn!("Store file {} is empty", self.path.display());
            return Ok(Some(Vec::new()));
        }

        let students: Vec<Student> =
            serde_json::from_str(&content).map_err(|e| self.store_error(e))?;
        tracing::debug!("Read {} records from {}", students.len(), self.path.display());
        Ok(Some(students))
    }

    fn save(&self, students: &[Student]) -> Result<()> {
        let json = serde_json::to_string_pretty(students)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.store_error(e))?;
            }
        }

        fs::write(&self.path, json).map_err(|e| self.store_error(e))?;
        tracing::debug!("Wrote {} records to {}", students.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
