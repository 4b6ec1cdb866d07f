// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page session: one controller object per page, driven by page events
//!
//! State machine:
//!
//! ```text
//! Idle --accept--> FileSelected --click--> Submitting --settle--> FileSelected
//!                      ^  |                                           |
//!                      +--+ accept (results hidden)  <----------------+
//! ```
//!
//! `Idle` is left for good once any file has been accepted.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::acquirer::{CandidateFile, FileAcquirer, OfferedFile, PageEvent};
use super::config::SessionConfig;
use super::controller::{AnalysisOutcome, AnalysisRequestController};
use super::notice::NoticeLog;
use super::renderer::ResultRenderer;
use super::selection::SelectionState;
use super::surface::UiSurface;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::network::{AnalysisTransport, HttpTransport};

/// Controller-level state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No file accepted yet; trigger disabled
    Idle,
    /// A candidate is held; trigger enabled
    FileSelected,
    /// A request is in flight; trigger disabled
    Submitting,
}

/// What a page event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResponse {
    /// File admitted and selected
    Accepted(String),
    /// File refused; a notice was raised and nothing else changed
    Rejected(String),
    /// Drop or pick carried no file
    NoFile,
    /// Drag highlight switched on or off
    DragHighlight(bool),
}

/// One page session
///
/// # Example
///
/// ```rust,no_run
/// use dropscan::{OfferedFile, PageEvent, Session, SessionConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let session = Session::connect(SessionConfig::for_local(5000))?;
///     session.dispatch(PageEvent::OfferedViaPick(vec![OfferedFile::new(
///         "scan.py",
///         "eval(input())",
///     )]));
///
///     if let Some(outcome) = session.click_analyze().await {
///         println!("{:?}", outcome);
///     }
///     Ok(())
/// }
/// ```
pub struct Session {
    config: SessionConfig,
    surface: UiSurface,
    notices: NoticeLog,
    acquirer: FileAcquirer,
    selection: SelectionState,
    controller: AnalysisRequestController,
    token: CancellationToken,
}

impl Session {
    /// Session on the bundled page, talking to the analyzer over HTTP
    pub fn connect(config: SessionConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::default())?;
        let transport = HttpTransport::new(client, config.upload_url()?)
            .timeout(config.request_timeout);
        Self::new(config, Arc::new(transport))
    }

    /// Session on the bundled page with the given transport
    pub fn new(config: SessionConfig, transport: Arc<dyn AnalysisTransport>) -> Result<Self> {
        let surface = UiSurface::from_template(&config.ids)?;
        Self::with_surface(config, surface, transport)
    }

    /// Session on an already bound page
    pub fn with_surface(
        config: SessionConfig,
        surface: UiSurface,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self> {
        config.validate()?;

        let texts = config.texts.clone();
        let notices = NoticeLog::new();
        let acquirer = FileAcquirer::new(config.accepted_suffix.clone());
        let in_flight = Arc::new(AtomicBool::new(false));
        let selection = SelectionState::new(
            surface.clone(),
            texts.file_label_prefix.clone(),
            in_flight.clone(),
        );
        let renderer = ResultRenderer::new(
            surface.clone(),
            config.vulnerability_marker.clone(),
            config.safe_marker.clone(),
            texts.no_vulnerabilities.clone(),
            texts.status_complete.clone(),
        );
        let token = CancellationToken::new();
        let controller = AnalysisRequestController::new(
            selection.clone(),
            surface.clone(),
            renderer,
            notices.clone(),
            transport,
            texts,
            config.field_name.clone(),
            config.request_timeout,
            in_flight,
            token.clone(),
        );

        surface.set_trigger_enabled(false);

        Ok(Self {
            config,
            surface,
            notices,
            acquirer,
            selection,
            controller,
            token,
        })
    }

    /// Handle a page event
    pub fn dispatch(&self, event: PageEvent) -> EventResponse {
        match event {
            PageEvent::DragEnter => {
                self.acquirer.drag_enter(&self.surface);
                EventResponse::DragHighlight(true)
            }
            PageEvent::DragLeave => {
                self.acquirer.drag_leave(&self.surface);
                EventResponse::DragHighlight(false)
            }
            PageEvent::OfferedViaDrop(files) => {
                self.acquirer.drag_leave(&self.surface);
                self.offer(files)
            }
            PageEvent::OfferedViaPick(files) => self.offer(files),
        }
    }

    fn offer(&self, files: Vec<OfferedFile>) -> EventResponse {
        let Some(file) = FileAcquirer::first_offered(files) else {
            return EventResponse::NoFile;
        };
        let name = file.name.clone();
        match self.acquirer.on_file_offered(file) {
            Ok(candidate) => {
                self.selection.accept(candidate);
                EventResponse::Accepted(name)
            }
            Err(_) => {
                self.notices.alert(self.config.texts.validation_notice.clone());
                EventResponse::Rejected(name)
            }
        }
    }

    /// Click the analyze trigger
    ///
    /// A click on a disabled trigger does nothing and returns `None`.
    pub async fn click_analyze(&self) -> Option<AnalysisOutcome> {
        if !self.surface.trigger_enabled() {
            tracing::debug!("click on disabled trigger ignored");
            return None;
        }
        self.controller.submit().await
    }

    /// Cancel the outstanding request; it settles as a transport error
    pub fn cancel_in_flight(&self) -> bool {
        self.controller.cancel()
    }

    pub fn state(&self) -> ControllerState {
        if self.controller.is_in_flight() {
            ControllerState::Submitting
        } else if self.selection.has_candidate() {
            ControllerState::FileSelected
        } else {
            ControllerState::Idle
        }
    }

    /// The live candidate
    pub fn current(&self) -> Option<CandidateFile> {
        self.selection.current()
    }

    pub fn surface(&self) -> &UiSurface {
        &self.surface
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
