//! Export/import of design files and autosave

use std::path::{Path, PathBuf};

use shared::Design;
use thiserror::Error;

use super::DesignState;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid design file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export file name: every whitespace run becomes a single `-`, edges included
pub fn export_file_name(design_name: &str) -> String {
    if design_name.is_empty() {
        return "design.json".to_string();
    }
    let mut stem = String::with_capacity(design_name.len());
    let mut in_space = false;
    for ch in design_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
        } else {
            stem.push(ch);
            in_space = false;
        }
    }
    format!("{stem}.json")
}

/// Write a design as pretty JSON
pub fn write_design_file(path: &Path, design: &Design) -> Result<(), FileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(design)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a design previously written by `write_design_file` (or downloaded from the API)
pub fn read_design_file(path: &Path) -> Result<Design, FileError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

impl DesignState {
    /// Export the current design into `dir`, returning the written path
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, FileError> {
        let design = self.get_current_design();
        let path = dir.join(export_file_name(&design.name));
        write_design_file(&path, &design)?;
        tracing::info!(path = %path.display(), "design exported");
        Ok(path)
    }

    /// Import a design file. The state is untouched on error.
    pub fn import_from_file(&mut self, path: &Path) -> Result<(), FileError> {
        let design = read_design_file(path)?;
        self.load_design(&design);
        Ok(())
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "container-designer", "container-designer")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save the design to the autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Err(e) = write_design_file(&path, &self.get_current_design()) {
                tracing::warn!(path = %path.display(), "autosave failed: {e}");
            }
        }
    }

    /// Load the design from the autosave file
    pub fn load_autosave() -> Option<Design> {
        let path = Self::autosave_path()?;
        read_design_file(&path).ok()
    }

    /// Check if autosave file exists
    pub fn has_autosave() -> bool {
        Self::autosave_path()
            .map(|p| p.exists())
            .unwrap_or(false)
    }
}
