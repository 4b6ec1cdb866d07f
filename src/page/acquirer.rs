// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File acquisition: drop and picker channels normalized to one admission check

use std::path::Path;

use bytes::Bytes;

use super::surface::UiSurface;
use crate::error::{Error, Result};

/// A file handed over by the drop target or the file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferedFile {
    pub name: String,
    pub bytes: Bytes,
    /// Content type reported by the source, if any
    pub mime: Option<String>,
}

impl OfferedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, named by its final path component
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::other(format!("{} has no file name", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }
}

/// A file that passed admission and may be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile(OfferedFile);

impl CandidateFile {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.0.bytes
    }

    pub fn mime(&self) -> Option<&str> {
        self.0.mime.as_deref()
    }

    pub fn len(&self) -> usize {
        self.0.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.bytes.is_empty()
    }
}

/// Page events, closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Files dropped onto the drop target
    OfferedViaDrop(Vec<OfferedFile>),
    /// Files chosen in the file picker
    OfferedViaPick(Vec<OfferedFile>),
    /// Pointer dragging over the drop target
    DragEnter,
    /// Pointer left the drop target
    DragLeave,
}

/// Applies extension-based admission to offered files
#[derive(Debug, Clone)]
pub struct FileAcquirer {
    accepted_suffix: String,
}

impl FileAcquirer {
    pub fn new(accepted_suffix: impl Into<String>) -> Self {
        Self {
            accepted_suffix: accepted_suffix.into(),
        }
    }

    /// The first file of a drop or pick; later entries are ignored
    pub fn first_offered(files: Vec<OfferedFile>) -> Option<OfferedFile> {
        files.into_iter().next()
    }

    /// Admit `file` if its name ends with the accepted suffix, as written
    ///
    /// Content is never inspected.
    pub fn on_file_offered(&self, file: OfferedFile) -> Result<CandidateFile> {
        if !file.name.ends_with(&self.accepted_suffix) {
            tracing::warn!(file = %file.name, expected = %self.accepted_suffix, "rejected offered file");
            return Err(Error::validation(file.name, self.accepted_suffix.clone()));
        }
        tracing::debug!(file = %file.name, bytes = file.bytes.len(), "accepted offered file");
        Ok(CandidateFile(file))
    }

    pub fn drag_enter(&self, surface: &UiSurface) {
        surface.set_drag_highlight(true);
    }

    /// Clears the highlight; also used when a drop lands
    pub fn drag_leave(&self, surface: &UiSurface) {
        surface.set_drag_highlight(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_gate() {
        let acquirer = FileAcquirer::new(".py");
        assert!(acquirer
            .on_file_offered(OfferedFile::new("scan.py", "print(1)"))
            .is_ok());

        for name in ["notes.txt", "scan.PY", "scan.py.bak", "scanpy", "", ".pyc", "scan.py "] {
            let err = acquirer
                .on_file_offered(OfferedFile::new(name, "x"))
                .unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{:?} accepted", name);
        }
    }

    #[test]
    fn test_content_is_not_inspected() {
        let acquirer = FileAcquirer::new(".py");
        let candidate = acquirer
            .on_file_offered(OfferedFile::new("binary.py", vec![0u8, 159, 146, 150]).with_mime("image/png"))
            .unwrap();
        assert_eq!(candidate.name(), "binary.py");
        assert_eq!(candidate.len(), 4);
        assert_eq!(candidate.mime(), Some("image/png"));
    }

    #[test]
    fn test_first_offered() {
        assert!(FileAcquirer::first_offered(vec![]).is_none());
        let first = FileAcquirer::first_offered(vec![
            OfferedFile::new("a.py", "a"),
            OfferedFile::new("b.py", "b"),
        ]);
        assert_eq!(first.unwrap().name, "a.py");
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.py");
        tokio::fs::write(&path, b"import os\n").await.unwrap();

        let file = OfferedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "scan.py");
        assert_eq!(file.bytes.as_ref(), b"import os\n");

        assert!(OfferedFile::from_path(dir.path().join("missing.py")).await.is_err());
    }
}
