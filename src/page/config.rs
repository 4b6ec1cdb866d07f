// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session configuration

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default analyzer base URL
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Element ids of each page role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceIds {
    pub drop_zone: String,
    pub file_input: String,
    pub trigger: String,
    pub results: String,
    pub file_label: String,
    pub status: String,
    pub vulnerability_list: String,
    pub safe_list: String,
    pub vulnerability_panel: String,
}

impl Default for SurfaceIds {
    fn default() -> Self {
        Self {
            drop_zone: "drop-zone".into(),
            file_input: "file-input".into(),
            trigger: "analyze-btn".into(),
            results: "results-section".into(),
            file_label: "file-name".into(),
            status: "status-badge".into(),
            vulnerability_list: "vuln-list".into(),
            safe_list: "safe-list".into(),
            vulnerability_panel: "vuln-card".into(),
        }
    }
}

/// User-visible strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTexts {
    pub idle_label: String,
    pub in_flight_label: String,
    pub idle_icon_class: String,
    pub status_complete: String,
    pub no_vulnerabilities: String,
    pub file_label_prefix: String,
    pub validation_notice: String,
    pub transport_notice: String,
    pub application_notice_prefix: String,
}

impl Default for SessionTexts {
    fn default() -> Self {
        Self {
            idle_label: "Run Analysis".into(),
            in_flight_label: "Analyzing...".into(),
            idle_icon_class: "ri-radar-line".into(),
            status_complete: "Complete".into(),
            no_vulnerabilities: "No vulnerabilities detected.".into(),
            file_label_prefix: "Selected: ".into(),
            validation_notice: "Please upload a Python (.py) file.".into(),
            transport_notice: "An unexpected error occurred.".into(),
            application_notice_prefix: "Error: ".into(),
        }
    }
}

/// Page session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Analyzer base URL
    pub endpoint: Url,
    /// Path of the upload route, joined onto `endpoint`
    pub upload_path: String,
    /// Multipart field carrying the file
    pub field_name: String,
    /// Filename suffix a candidate must carry (case-sensitive)
    pub accepted_suffix: String,
    /// Request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Marker glyph stripped from flagged findings
    pub vulnerability_marker: String,
    /// Marker glyph stripped from passed checks
    pub safe_marker: String,
    /// Element ids of the page roles
    pub ids: SurfaceIds,
    /// User-visible strings
    pub texts: SessionTexts,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            upload_path: "/upload".into(),
            field_name: "file".into(),
            accepted_suffix: ".py".into(),
            request_timeout: None,
            vulnerability_marker: "⚠️".into(),
            safe_marker: "✅".into(),
            ids: SurfaceIds::default(),
            texts: SessionTexts::default(),
        }
    }
}

impl SessionConfig {
    /// Create a new session config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the analyzer base URL
    pub fn endpoint(mut self, endpoint: impl AsRef<str>) -> Result<Self> {
        self.endpoint = Url::parse(endpoint.as_ref())?;
        Ok(self)
    }

    /// Set the upload route path
    pub fn upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }

    /// Set the multipart field name
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Set the accepted filename suffix
    pub fn accepted_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.accepted_suffix = suffix.into();
        self
    }

    /// Set a request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set element ids
    pub fn ids(mut self, ids: SurfaceIds) -> Self {
        self.ids = ids;
        self
    }

    /// Set user-visible strings
    pub fn texts(mut self, texts: SessionTexts) -> Self {
        self.texts = texts;
        self
    }

    /// Full URL of the upload route
    pub fn upload_url(&self) -> Result<Url> {
        Ok(self.endpoint.join(&self.upload_path)?)
    }

    /// Check the config before a session is built from it
    pub fn validate(&self) -> Result<()> {
        if self.field_name.is_empty() {
            return Err(Error::Config("field name must not be empty".into()));
        }
        if self.accepted_suffix.is_empty() {
            return Err(Error::Config("accepted suffix must not be empty".into()));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(Error::Config("request timeout must be positive".into()));
        }
        self.upload_url()?;
        Ok(())
    }

    /// Config for a local analyzer on a given port
    pub fn for_local(port: u16) -> Self {
        let mut config = Self::default();
        // http URLs with a host always accept a port
        config.endpoint.set_port(Some(port)).ok();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::new();
        assert_eq!(config.upload_url().unwrap().as_str(), "http://127.0.0.1:5000/upload");
        assert_eq!(config.field_name, "file");
        assert_eq!(config.accepted_suffix, ".py");
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .endpoint("https://scanner.example/api/")
            .unwrap()
            .upload_path("upload")
            .request_timeout(Duration::from_secs(20));
        assert_eq!(
            config.upload_url().unwrap().as_str(),
            "https://scanner.example/api/upload"
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(
            SessionConfig::for_local(8080).endpoint.as_str(),
            "http://127.0.0.1:8080/"
        );
    }

    #[test]
    fn test_validate() {
        assert!(SessionConfig::new().field_name("").validate().is_err());
        assert!(SessionConfig::new().accepted_suffix("").validate().is_err());
        assert!(SessionConfig::new()
            .request_timeout(Duration::ZERO)
            .validate()
            .is_err());
        assert!(SessionConfig::new().endpoint("not a url").is_err());
    }
}
