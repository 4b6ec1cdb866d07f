// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer for Dropscan
//!
//! Multipart upload over reqwest and the buffered response it yields.

mod client;
mod form;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use form::{UploadForm, DEFAULT_PART_MIME};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("dropscan/", env!("CARGO_PKG_VERSION"));
