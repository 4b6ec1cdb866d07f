// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client for analyzer uploads

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use super::form::UploadForm;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// The analyzer answers JSON; anything else is still read and classified
const ACCEPT_JSON: &str = "application/json, text/plain;q=0.9, */*;q=0.8";

/// Connection settings for the upload client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    /// Limit on establishing the connection; the upload itself is unbounded
    /// unless the caller passes a timeout
    pub connect_timeout: Duration,
    /// Accept invalid TLS certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Route uploads through this proxy
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// For analyzers behind self-signed certificates
    pub fn insecure(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
}

/// Upload client; cheap to clone
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            inner: builder.build()?,
            config,
        })
    }

    /// POST `form` as multipart to `url` and read the whole reply
    ///
    /// A non-2xx status is not an error here; the caller classifies the body.
    pub async fn post_multipart(
        &self,
        url: &Url,
        form: UploadForm,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        tracing::info!(url = %url, file = %form.filename, bytes = form.len(), "Upload");

        let mut request = self
            .inner
            .post(url.clone())
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_JSON))
            .multipart(form.into_multipart()?);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let started = Instant::now();
        let reply = Response::read(request.send().await?, started).await?;

        tracing::info!(
            url = %reply.url(),
            status = %reply.status(),
            bytes = reply.body().len(),
            time_ms = reply.elapsed().as_millis() as u64,
            "Upload response"
        );

        Ok(reply)
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}
