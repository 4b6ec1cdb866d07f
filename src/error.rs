// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Dropscan
//!
//! The session never lets these reach the caller for the three recoverable
//! classes (validation, application, transport); they are classified into an
//! [`AnalysisOutcome`](crate::page::AnalysisOutcome) and a user notice instead.
//! Construction-time failures (bad config, missing page elements) do surface.

use thiserror::Error;

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure dropscan can report
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS, or body read failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint or proxy URL could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Page template could not be read
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Page is missing an element the session needs
    #[error("DOM error: {0}")]
    Dom(String),

    /// Unsupported or malformed selector
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Reading a file from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reply body is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session or client settings rejected
    #[error("Configuration error: {0}")]
    Config(String),

    /// Offered file does not carry the accepted suffix
    #[error("Rejected file '{filename}': expected suffix {expected}")]
    Validation { filename: String, expected: String },

    /// Analyzer understood the request and reported a problem
    #[error("Analyzer error: {message}")]
    Application { message: String },

    /// Analyzer reply could not be understood
    #[error("Unrecognized analyzer reply (status {status}): {reason}")]
    UnrecognizedReply { status: u16, reason: String },

    /// Request exceeded its time limit
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// In-flight request was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// Anything else, message only
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn dom<S: Into<String>>(msg: S) -> Self {
        Error::Dom(msg.into())
    }

    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(filename: impl Into<String>, expected: impl Into<String>) -> Self {
        Error::Validation {
            filename: filename.into(),
            expected: expected.into(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Error::Application {
            message: message.into(),
        }
    }

    pub fn unrecognized(status: u16, reason: impl Into<String>) -> Self {
        Error::UnrecognizedReply {
            status,
            reason: reason.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// The request did not complete, or its reply was unintelligible
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Serialization(_)
                | Error::UnrecognizedReply { .. }
                | Error::Timeout { .. }
                | Error::Cancelled
        )
    }

    /// The user can simply try again
    pub fn is_recoverable(&self) -> bool {
        self.is_transport() || matches!(self, Error::Validation { .. } | Error::Application { .. })
    }
}
