//! Error types shared by the gateways, the planning session and the UI.
use thiserror::Error;

/// Failures talking to the TripTailor backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Network-level failure (connection refused, DNS, reset...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The client-side timeout elapsed before a response arrived
    #[error("The backend did not answer in time")]
    Timeout,

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Body could not be decoded into the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    /// Whether trying the same request again by hand may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode(_) => false,
        }
    }

    /// Short message suitable for inline display next to the failed control.
    pub fn user_message(&self) -> String {
        let base = match self {
            ApiError::Transport(_) => "Could not reach the server.".to_string(),
            ApiError::Timeout => "The server took too long to respond.".to_string(),
            ApiError::Status { status, detail } if detail.is_empty() => {
                format!("The server rejected the request ({}).", status)
            }
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        };
        if self.is_retryable() {
            format!("{} Please try again.", base)
        } else {
            base
        }
    }
}

/// Failures of the planning flow itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Pick both travel dates and at least one landmark first")]
    NotReady,

    #[error("An itinerary is already being generated")]
    AlreadyGenerating,

    #[error("No itinerary has been generated in this session")]
    MissingNavigationState,

    #[error("No region selected")]
    NoRegionSelected,

    #[error("Region {0} is not available for this country")]
    UnknownRegion(String),

    #[error("Landmark {0} is not part of the current region")]
    UnknownLandmark(i64),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PlanError {
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
