// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Analysis request lifecycle
//!
//! One submit: enter in-flight, package the live candidate, await the single
//! network round-trip, classify, apply, leave in-flight. Leaving in-flight is
//! tied to a guard so it runs exactly once on every exit path, including the
//! submit future being dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::config::SessionTexts;
use super::notice::{ConsoleLevel, NoticeLog};
use super::renderer::ResultRenderer;
use super::selection::SelectionState;
use super::surface::UiSurface;
use crate::error::{Error, Result};
use crate::http::{Response, UploadForm, DEFAULT_PART_MIME};
use crate::network::{classify_reply, AnalysisResults, AnalysisTransport};

/// Classified result of one submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Analyzer returned results; they were rendered
    Success(AnalysisResults),
    /// Analyzer reported a problem; its message was shown verbatim
    ApplicationError(String),
    /// Request did not complete or the reply was unintelligible; carries the
    /// diagnostic written to the console
    TransportError(String),
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn results(&self) -> Option<&AnalysisResults> {
        match self {
            AnalysisOutcome::Success(results) => Some(results),
            _ => None,
        }
    }

    fn from_reply(reply: Result<AnalysisResults>) -> Self {
        match reply {
            Ok(results) => AnalysisOutcome::Success(results),
            Err(Error::Application { message }) => AnalysisOutcome::ApplicationError(message),
            Err(other) => AnalysisOutcome::TransportError(other.to_string()),
        }
    }
}

/// Disables the trigger on entry and restores it on drop
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    surface: &'a UiSurface,
    texts: &'a SessionTexts,
}

impl<'a> InFlightGuard<'a> {
    fn enter(flag: &'a AtomicBool, surface: &'a UiSurface, texts: &'a SessionTexts) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        surface.set_trigger_enabled(false);
        surface.set_trigger_text(&texts.in_flight_label);
        Some(Self {
            flag,
            surface,
            texts,
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.surface
            .set_trigger_idle(&self.texts.idle_icon_class, &self.texts.idle_label);
        self.surface.set_trigger_enabled(true);
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns the submit lifecycle
pub struct AnalysisRequestController {
    selection: SelectionState,
    surface: UiSurface,
    renderer: ResultRenderer,
    notices: NoticeLog,
    transport: Arc<dyn AnalysisTransport>,
    texts: SessionTexts,
    field_name: String,
    request_timeout: Option<Duration>,
    in_flight: Arc<AtomicBool>,
    session_token: CancellationToken,
    current_token: Mutex<Option<CancellationToken>>,
}

impl AnalysisRequestController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        selection: SelectionState,
        surface: UiSurface,
        renderer: ResultRenderer,
        notices: NoticeLog,
        transport: Arc<dyn AnalysisTransport>,
        texts: SessionTexts,
        field_name: impl Into<String>,
        request_timeout: Option<Duration>,
        in_flight: Arc<AtomicBool>,
        session_token: CancellationToken,
    ) -> Self {
        Self {
            selection,
            surface,
            renderer,
            notices,
            transport,
            texts,
            field_name: field_name.into(),
            request_timeout,
            in_flight,
            session_token,
            current_token: Mutex::new(None),
        }
    }

    /// Whether a request is outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Cancel the outstanding request, if any
    ///
    /// Returns whether a request was cancelled.
    pub fn cancel(&self) -> bool {
        match self.current_token.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Run one analysis of the live candidate
    ///
    /// Returns `None` without side effects when no candidate is held or a
    /// request is already in flight.
    pub async fn submit(&self) -> Option<AnalysisOutcome> {
        let Some(candidate) = self.selection.current() else {
            tracing::debug!("submit without candidate ignored");
            return None;
        };
        let Some(_guard) = InFlightGuard::enter(&self.in_flight, &self.surface, &self.texts) else {
            tracing::debug!("submit while in flight ignored");
            return None;
        };

        let form = UploadForm::new(
            self.field_name.clone(),
            candidate.name(),
            candidate.bytes().clone(),
        )
        .mime(candidate.mime().unwrap_or(DEFAULT_PART_MIME));
        drop(candidate);

        let token = self.session_token.child_token();
        *self.current_token.lock() = Some(token.clone());

        tracing::info!(
            file = %form.filename,
            bytes = form.len(),
            endpoint = %self.transport.endpoint(),
            "submitting analysis"
        );

        let reply = self.send(form, &token).await;
        *self.current_token.lock() = None;

        let outcome = AnalysisOutcome::from_reply(reply);
        self.apply(&outcome);
        Some(outcome)
    }

    async fn send(&self, form: UploadForm, token: &CancellationToken) -> Result<AnalysisResults> {
        let upload = self.transport.upload(form);
        let request = async {
            match self.request_timeout {
                Some(limit) => match tokio::time::timeout(limit, upload).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::timeout("upload", limit.as_millis() as u64)),
                },
                None => upload.await,
            }
        };

        let response: Response = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(Error::Cancelled),
            response = request => response?,
        };
        classify_reply(&response)
    }

    fn apply(&self, outcome: &AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Success(results) => {
                tracing::info!(
                    vulnerabilities = results.vulnerabilities.len(),
                    safe = results.safe.len(),
                    "analysis complete"
                );
                self.renderer.render(results);
            }
            AnalysisOutcome::ApplicationError(message) => {
                tracing::warn!(%message, "analyzer reported an error");
                self.notices
                    .alert(format!("{}{}", self.texts.application_notice_prefix, message));
            }
            AnalysisOutcome::TransportError(diagnostic) => {
                self.notices
                    .console(ConsoleLevel::Error, format!("Error: {}", diagnostic));
                self.notices.alert(self.texts.transport_notice.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::config::SurfaceIds;

    #[test]
    fn test_outcome_from_reply() {
        let ok = AnalysisOutcome::from_reply(Ok(AnalysisResults::default()));
        assert!(ok.is_success());
        assert_eq!(ok.results(), Some(&AnalysisResults::default()));

        assert_eq!(
            AnalysisOutcome::from_reply(Err(Error::application("file too large"))),
            AnalysisOutcome::ApplicationError("file too large".into())
        );
        assert_eq!(
            AnalysisOutcome::from_reply(Err(Error::Cancelled)),
            AnalysisOutcome::TransportError("Request cancelled".into())
        );
    }

    #[test]
    fn test_guard_restores_trigger_once() {
        let surface = UiSurface::from_template(&SurfaceIds::default()).unwrap();
        let texts = SessionTexts::default();
        let flag = AtomicBool::new(false);

        {
            let guard = InFlightGuard::enter(&flag, &surface, &texts);
            assert!(guard.is_some());
            assert!(!surface.trigger_enabled());
            assert_eq!(surface.trigger_label(), "Analyzing...");
            assert!(InFlightGuard::enter(&flag, &surface, &texts).is_none());
        }

        assert!(surface.trigger_enabled());
        assert_eq!(surface.trigger_label(), "Run Analysis");
        assert!(surface.trigger_has_icon());
        assert!(!flag.load(Ordering::Acquire));
    }
}
