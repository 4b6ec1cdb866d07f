// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Selection state: the single candidate-file slot

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::acquirer::CandidateFile;
use super::surface::UiSurface;

/// Holds the accepted candidate and keeps the page in step with it
///
/// Outside a request, the analyze trigger is enabled if and only if a
/// candidate is held. During a request it stays disabled until the request
/// settles, whatever is accepted meanwhile.
#[derive(Debug, Clone)]
pub struct SelectionState {
    current: Arc<RwLock<Option<CandidateFile>>>,
    surface: UiSurface,
    label_prefix: String,
    in_flight: Arc<AtomicBool>,
}

impl SelectionState {
    pub fn new(
        surface: UiSurface,
        label_prefix: impl Into<String>,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            surface,
            label_prefix: label_prefix.into(),
            in_flight,
        }
    }

    /// Replace the candidate, last write wins
    ///
    /// Hides any rendered report, updates the filename label and enables the
    /// trigger. A request already in flight keeps the bytes it captured.
    pub fn accept(&self, file: CandidateFile) {
        let label = format!("{}{}", self.label_prefix, file.name());
        tracing::debug!(file = %file.name(), "candidate selected");
        *self.current.write() = Some(file);

        self.clear_results_visibility();
        self.surface.set_file_label(&label);
        if !self.in_flight.load(Ordering::Acquire) {
            self.surface.set_trigger_enabled(true);
        }
    }

    /// The live candidate, read at call time
    pub fn current(&self) -> Option<CandidateFile> {
        self.current.read().clone()
    }

    pub fn has_candidate(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn clear_results_visibility(&self) {
        self.surface.hide_results();
    }
}
