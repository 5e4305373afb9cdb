//! Document references for identity verification
//!
//! Only the path is kept; files are never read or copied.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File extensions accepted for uploaded documents
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "heic"];

/// A reference to a local document file; empty means "not provided"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self(path.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File name portion for display
    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.0).file_name().and_then(|n| n.to_str())
    }

    /// Check the reference names an existing file with an accepted extension
    pub fn check(&self, label: &str) -> Result<(), String> {
        if self.is_empty() {
            return Err(format!("{} is required", label));
        }

        let path = Path::new(&self.0);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(format!(
                "{} must be one of: {}",
                label,
                ACCEPTED_EXTENSIONS.join(", ")
            ));
        }

        if !path.is_file() {
            return Err(format!("{} file not found: {}", label, self.0));
        }

        Ok(())
    }
}
