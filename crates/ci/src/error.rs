use std::path::PathBuf;

/// Errors from fetching build runs.
#[derive(Debug, thiserror::Error)]
pub enum CiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CI provider returned a non-2xx status code.
    #[error("CI provider API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response or file did not contain the expected JSON shape.
    #[error("Malformed run payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Cannot read runs file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
