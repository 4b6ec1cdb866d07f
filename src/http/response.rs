// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Buffered analyzer reply

use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// A reply whose body has been read to the end
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    content_type: Option<String>,
    body: Bytes,
    url: Url,
    elapsed: Duration,
}

impl Response {
    /// Drain a reqwest response; `started` is when the request was issued
    pub(crate) async fn read(response: reqwest::Response, started: Instant) -> Result<Self> {
        let status = response.status();
        let url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Self {
            status,
            content_type,
            body,
            url,
            elapsed: started.elapsed(),
        })
    }

    /// Build a reply from a status and body, for transports that do not
    /// speak HTTP themselves
    pub fn from_parts(status: u16, body: impl Into<Bytes>, url: Url) -> Result<Self> {
        let status = StatusCode::from_u16(status)
            .map_err(|e| Error::other(format!("Invalid status {}: {}", status, e)))?;
        Ok(Self {
            status,
            content_type: None,
            body: body.into(),
            url,
            elapsed: Duration::ZERO,
        })
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Final URL after redirects
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Time from issuing the request to the last body byte
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON, whatever the declared content type
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Leading part of the body for diagnostics, cut on a char boundary
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = self.text_lossy();
        let mut chars = text.trim().chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://127.0.0.1:5000/upload").unwrap()
    }

    #[test]
    fn test_from_parts() {
        let resp = Response::from_parts(500, Bytes::new(), url()).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.status_code(), 500);
        assert_eq!(resp.elapsed(), Duration::ZERO);
        assert!(resp.content_type().is_none());
        assert!(Response::from_parts(42, Bytes::new(), url()).is_err());
    }

    #[test]
    fn test_json_ignores_content_type() {
        let resp = Response::from_parts(200, "{\"success\": false}", url())
            .unwrap()
            .with_content_type("text/html");
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["success"], serde_json::Value::Bool(false));

        let resp = Response::from_parts(200, "<html>oops</html>", url()).unwrap();
        assert!(matches!(
            resp.json::<serde_json::Value>(),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_excerpt() {
        let resp = Response::from_parts(502, "  <html>Bad Gateway</html>\n", url()).unwrap();
        assert_eq!(resp.excerpt(64), "<html>Bad Gateway</html>");
        assert_eq!(resp.excerpt(6), "<html>...");
        assert_eq!(resp.body().len(), 27);
    }
}
