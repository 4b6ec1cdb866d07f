// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Wire model of the analyzer's `/upload` reply
//!
//! ```json
//! {"success": true,  "results": {"vulnerabilities": ["..."], "safe": ["..."]}}
//! {"success": false, "error": "file too large"}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::http::Response;

/// Message used when the analyzer reports failure without saying why
pub const UNKNOWN_APPLICATION_ERROR: &str = "unknown error";

/// Findings reported for one uploaded file, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Flagged findings
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vulnerabilities: Vec<String>,
    /// Passed checks
    #[serde(default, deserialize_with = "null_as_empty")]
    pub safe: Vec<String>,
    /// Files the analyzer could not parse; carried along, never rendered
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,
}

impl AnalysisResults {
    /// Create results from flagged findings and passed checks
    pub fn new<V, S>(vulnerabilities: V, safe: S) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            vulnerabilities: vulnerabilities.into_iter().map(Into::into).collect(),
            safe: safe.into_iter().map(Into::into).collect(),
            errors: Vec::new(),
        }
    }

    /// Whether any finding was flagged
    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Classify an analyzer reply
///
/// `Ok` carries the results of a successful analysis. `Err(Error::Application)`
/// carries the analyzer's own message. Every other error means the reply could
/// not be understood and is a transport failure.
pub fn classify_reply(response: &Response) -> Result<AnalysisResults> {
    let status = response.status_code();
    let value: Value = response.json().map_err(|_| {
        Error::unrecognized(status, format!("body is not JSON: {}", response.excerpt(80)))
    })?;
    let reply = value
        .as_object()
        .ok_or_else(|| Error::unrecognized(status, "reply is not a JSON object"))?;

    match reply.get("success") {
        Some(flag) if is_truthy(flag) => {
            let results = reply
                .get("results")
                .filter(|r| r.is_object())
                .ok_or_else(|| Error::unrecognized(status, "success reply without results"))?;
            AnalysisResults::deserialize(results)
                .map_err(|e| Error::unrecognized(status, format!("malformed results: {}", e)))
        }
        flag => match error_message(reply) {
            Some(message) => Err(Error::application(message)),
            None if flag.is_none() => Err(Error::unrecognized(
                status,
                "reply carries neither success nor error",
            )),
            None => Err(Error::application(UNKNOWN_APPLICATION_ERROR)),
        },
    }
}

fn error_message(reply: &Map<String, Value>) -> Option<String> {
    match reply.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// JavaScript truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn reply(status: u16, body: &str) -> Response {
        let url = Url::parse("http://127.0.0.1:5000/upload").unwrap();
        Response::from_parts(status, body.to_string(), url).unwrap()
    }

    #[test]
    fn test_success_reply() {
        let results = classify_reply(&reply(
            200,
            r#"{"success": true, "results": {"vulnerabilities": ["⚠️ eval() used"],
                "safe": ["✅ no hardcoded secrets"], "errors": [], "raw": ["x"]}}"#,
        ))
        .unwrap();
        assert_eq!(results.vulnerabilities, vec!["⚠️ eval() used"]);
        assert_eq!(results.safe, vec!["✅ no hardcoded secrets"]);
        assert!(results.has_vulnerabilities());
    }

    #[test]
    fn test_missing_and_null_lists_are_empty() {
        let results = classify_reply(&reply(
            200,
            r#"{"success": 1, "results": {"vulnerabilities": null}}"#,
        ))
        .unwrap();
        assert_eq!(results, AnalysisResults::default());
    }

    #[test]
    fn test_application_errors() {
        let err = classify_reply(&reply(500, r#"{"success": false, "error": "file too large"}"#))
            .unwrap_err();
        assert!(matches!(err, Error::Application { ref message } if message == "file too large"));

        // Flask answers 400 without a success flag
        let err = classify_reply(&reply(400, r#"{"error": "No file part"}"#)).unwrap_err();
        assert!(matches!(err, Error::Application { ref message } if message == "No file part"));

        let err = classify_reply(&reply(200, r#"{"success": false}"#)).unwrap_err();
        assert!(
            matches!(err, Error::Application { ref message } if message == UNKNOWN_APPLICATION_ERROR)
        );
    }

    #[test]
    fn test_transport_errors() {
        for (status, body) in [
            (502, "<html>Bad Gateway</html>"),
            (200, "[1, 2]"),
            (200, r#"{"status": "ok"}"#),
            (200, r#"{"success": true}"#),
            (200, r#"{"success": true, "results": {"safe": [1]}}"#),
        ] {
            let err = classify_reply(&reply(status, body)).unwrap_err();
            assert!(err.is_transport(), "{} should be transport, got {:?}", body, err);
        }
    }
}
