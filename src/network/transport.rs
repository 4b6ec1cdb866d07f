// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Upload transport seam
//!
//! The session talks to the analyzer only through [`AnalysisTransport`], so
//! tests and embedders can substitute a scripted transport for the network.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::http::{HttpClient, Response, UploadForm};

/// Sends one upload to the analyzer and returns its raw reply
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use dropscan::http::{Response, UploadForm};
/// use dropscan::network::AnalysisTransport;
///
/// struct AlwaysClean;
///
/// #[async_trait]
/// impl AnalysisTransport for AlwaysClean {
///     async fn upload(&self, _form: UploadForm) -> dropscan::Result<Response> {
///         let url = url::Url::parse("memory:/upload")?;
///         Response::from_parts(
///             200,
///             r#"{"success": true, "results": {"vulnerabilities": [], "safe": []}}"#,
///             url,
///         )
///     }
/// }
/// ```
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Send the upload; resolves once the full reply body has arrived
    async fn upload(&self, form: UploadForm) -> Result<Response>;

    /// Where uploads go, for diagnostics
    fn endpoint(&self) -> String {
        "<unknown>".to_string()
    }
}

/// HTTP transport: `POST <endpoint>` with a multipart body
#[derive(Clone)]
pub struct HttpTransport {
    client: HttpClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`
    pub fn new(client: HttpClient, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            timeout: None,
        }
    }

    /// Apply a per-request timeout at the HTTP layer as well
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn upload(&self, form: UploadForm) -> Result<Response> {
        self.client
            .post_multipart(&self.endpoint, form, self.timeout)
            .await
    }

    fn endpoint(&self) -> String {
        self.endpoint.to_string()
    }
}
