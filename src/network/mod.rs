// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Analyzer transport and reply classification

mod transport;
mod wire;

pub use transport::{AnalysisTransport, HttpTransport};
pub use wire::{classify_reply, AnalysisResults, UNKNOWN_APPLICATION_ERROR};
