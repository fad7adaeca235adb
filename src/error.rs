//! Error types and API error classification.

use serde::Deserialize;

/// Result alias used throughout the client.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error response returned by the Mobula API (any non-2xx status).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mobula API error (status {status}): {}", detail(.message, .raw_body))]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Message extracted from the body, empty if none could be found.
    pub message: String,
    /// Response body, verbatim.
    pub raw_body: String,
}

fn detail<'a>(message: &'a str, raw_body: &'a str) -> &'a str {
    if message.is_empty() { raw_body } else { message }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds an [`ApiError`] from a failed response.
///
/// The body is interpreted as `{"error": "...", "message": "..."}` on a best-effort
/// basis, `error` winning over `message`. Anything else leaves the message empty.
pub fn classify(status: u16, body: &[u8]) -> ApiError {
    let raw_body = String::from_utf8_lossy(body).into_owned();

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .error
                .filter(|e| !e.is_empty())
                .or(parsed.message.filter(|m| !m.is_empty()))
        })
        .unwrap_or_default();

    ApiError {
        status,
        message,
        raw_body,
    }
}

/// Coarse error category, for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client misconfiguration (bad base URL, unusable API key).
    Config,
    /// The request body could not be serialized.
    Encode,
    /// Network-level failure before a response arrived.
    Transport,
    /// The call ran past its deadline.
    Timeout,
    /// The call was cancelled by the caller.
    Cancelled,
    /// The response body could not be read.
    Io,
    /// The API answered with a non-2xx status.
    Api,
    /// A 2xx body did not match the expected shape.
    Decode,
}

/// Errors produced by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    /// The API key contains bytes not allowed in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
    /// Serializing the request body failed.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    /// Sending the request failed.
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The request deadline elapsed before the call completed.
    #[error("request timed out")]
    Timeout,
    /// The call was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,
    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Io(#[source] std::io::Error),
    /// The API returned a non-success status.
    #[error("{0}")]
    Api(#[from] ApiError),
    /// A successful response could not be decoded into the expected type.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidBaseUrl { .. } | Error::InvalidApiKey => ErrorKind::Config,
            Error::Encode(_) => ErrorKind::Encode,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Timeout => ErrorKind::Timeout,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Io(_) => ErrorKind::Io,
            Error::Api(_) => ErrorKind::Api,
            Error::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    pub(crate) fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(error))
    }
}
