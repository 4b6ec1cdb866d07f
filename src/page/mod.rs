// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page session: file acquisition, selection, submit lifecycle, rendering

mod acquirer;
mod config;
mod controller;
mod notice;
mod renderer;
mod selection;
mod session;
mod surface;

pub use acquirer::{CandidateFile, FileAcquirer, OfferedFile, PageEvent};
pub use config::{SessionConfig, SessionTexts, SurfaceIds, DEFAULT_ENDPOINT};
pub use controller::{AnalysisOutcome, AnalysisRequestController};
pub use notice::{Alert, ConsoleLevel, ConsoleMessage, NoticeLog};
pub use renderer::{strip_marker, ResultRenderer};
pub use selection::SelectionState;
pub use session::{ControllerState, EventResponse, Session};
pub use surface::{UiSurface, DEFAULT_PAGE};
