// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Multipart upload body

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::error::Result;

/// Default content type of the uploaded part
pub const DEFAULT_PART_MIME: &str = "application/octet-stream";

/// A single-part multipart upload: one named field carrying a file
///
/// The bytes are captured when the form is built, so replacing the selected
/// file afterwards does not change what this form sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    /// Form field name
    pub field_name: String,
    /// Original filename sent in the part's Content-Disposition
    pub filename: String,
    /// Part content type
    pub mime: String,
    /// File content
    pub bytes: Bytes,
}

impl UploadForm {
    /// Create an upload form for one file under `field_name`
    pub fn new(field_name: impl Into<String>, filename: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            field_name: field_name.into(),
            filename: filename.into(),
            mime: DEFAULT_PART_MIME.to_string(),
            bytes,
        }
    }

    /// Set the part content type
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Size of the file part in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file part is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Build the reqwest multipart form
    pub fn into_multipart(self) -> Result<Form> {
        let part = Part::bytes(self.bytes.to_vec())
            .file_name(self.filename)
            .mime_str(&self.mime)?;
        Ok(Form::new().part(self.field_name, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_form() {
        let form = UploadForm::new("file", "scan.py", Bytes::from_static(b"print(1)\n"));
        assert_eq!(form.len(), 9);
        assert_eq!(form.mime, DEFAULT_PART_MIME);
        assert!(form.into_multipart().is_ok());
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let form = UploadForm::new("file", "scan.py", Bytes::new()).mime("not-a-mime");
        assert!(form.into_multipart().is_err());
    }
}
