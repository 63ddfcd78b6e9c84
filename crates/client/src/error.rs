/// Errors from the Tumbuh client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, usually `{"error": ..., "code": ...}`.
        body: String,
    },

    /// An authenticated endpoint was called before logging in.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Writing to the local store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ClientError {
    /// The server's machine-readable error code (e.g. `"NO_STANDARD_DATA"`),
    /// if this is an API error with a JSON body.
    pub fn code(&self) -> Option<String> {
        let ClientError::Api { body, .. } = self else {
            return None;
        };
        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        json.get("code")?.as_str().map(str::to_string)
    }

    /// Whether the server had no reference values for the measurement.
    pub fn is_no_standard_data(&self) -> bool {
        self.code().as_deref() == Some("NO_STANDARD_DATA")
    }
}
