//! Error types for the client.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Errors that prevent a request from producing a response at all.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

/// A non-success response from the Datadog API, as an error value.
///
/// The message names the status code and, when the body carries an
/// `errors` field (a list of strings or a single string), lists each error
/// on its own line.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ApiError {
    status: u16,
    content: Value,
}

impl ApiError {
    /// Build from a status and an optional body. A missing body is recorded
    /// as an empty object.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            content: body.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    /// The error messages carried in the body, flattened to a list.
    pub fn errors(&self) -> Vec<String> {
        match self.content.get("errors") {
            Some(Value::Array(errors)) => errors.iter().map(render_error).collect(),
            Some(other) => vec![render_error(other)],
            None => Vec::new(),
        }
    }
}

fn render_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datadog API call returned status {}", self.status)?;
        if self.content.get("errors").is_some() {
            f.write_str(":\n")?;
            for error in self.errors() {
                writeln!(f, "{}", error)?;
            }
        }
        Ok(())
    }
}
