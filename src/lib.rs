// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Dropscan - Source File Analysis Client
//!
//! Client side of a static-analysis upload page. A user offers one Python
//! source file (drag-and-drop or file picker), the file is uploaded to an
//! analyzer service as multipart form data, and the returned findings are
//! rendered into a report of flagged and passed checks.
//!
//! ## Features
//!
//! - Page model: role-based handles into a parsed HTML page
//! - File acquisition: drop and pick unified into one admission path
//! - Single flight: at most one upload outstanding, trigger restored on every exit
//! - Reply classification: success, application error, transport error
//! - Inert rendering: server strings only ever become text nodes
//! - Cancellation: per-request tokens, optional request timeout
//!
//! ## Example
//!
//! ```rust,no_run
//! use dropscan::{AnalysisOutcome, OfferedFile, PageEvent, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::connect(SessionConfig::default())?;
//!
//!     let file = OfferedFile::from_path("scan.py").await?;
//!     session.dispatch(PageEvent::OfferedViaDrop(vec![file]));
//!
//!     if let Some(AnalysisOutcome::Success(results)) = session.click_analyze().await {
//!         for finding in session.surface().vulnerability_items() {
//!             println!("flagged: {}", finding);
//!         }
//!         println!("{} checks passed", results.safe.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod http;
pub mod network;
pub mod page;

// Re-exports for convenience

// Session and configuration
pub use page::{ControllerState, EventResponse, Session, SessionConfig, SessionTexts, SurfaceIds};

// File acquisition
pub use page::{CandidateFile, FileAcquirer, OfferedFile, PageEvent};

// Submit lifecycle and rendering
pub use page::{AnalysisOutcome, AnalysisRequestController, ResultRenderer, SelectionState};

// Page surface and notices
pub use page::{Alert, ConsoleLevel, ConsoleMessage, NoticeLog, UiSurface};

// Wire
pub use network::{classify_reply, AnalysisResults, AnalysisTransport, HttpTransport};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Response, UploadForm};

// DOM
pub use dom::{Document, Element, Node};

// Errors
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
