use thiserror::Error;

/// Errors produced while fetching a transaction.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or other transport failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        /// The requested URL
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// The response body was not what the endpoint promises.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A JSON body failed to deserialize.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built from the given configuration.
    #[error("Invalid client configuration: {0}")]
    Client(#[source] reqwest::Error),

    /// Every attempt allowed by the retry policy failed.
    #[error("Gave up after {attempts} attempts: {source}")]
    Exhausted {
        /// The number of attempts made
        attempts: u32,
        /// The error from the last attempt
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// True for transport failures and for 5xx and 429 statuses. These are worth another try.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Request(_) => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if the request never got a response.
    pub fn is_network(&self) -> bool {
        match self {
            FetchError::Request(_) => true,
            FetchError::Exhausted { source, .. } => source.is_network(),
            _ => false,
        }
    }

    /// Returns true if a response arrived but could not be parsed.
    pub fn from_parsing(&self) -> bool {
        match self {
            FetchError::MalformedResponse(_) | FetchError::Json(_) => true,
            FetchError::Exhausted { source, .. } => source.from_parsing(),
            _ => false,
        }
    }
}
