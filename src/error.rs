use thiserror::Error;

/// Error kinds surfaced by the library.
///
/// Every variant is terminal for the triggering action only; callers decide
/// whether to report and continue or abort.
#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed with HTTP {status}")]
    Http { status: reqwest::StatusCode },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Parse(String),

    #[error("unknown area: {input:?} is neither a municipality code nor a known name")]
    UnknownArea { input: String },

    #[error("not enough data to project a trend (need at least 2 points, got {got})")]
    InsufficientData { got: usize },

    #[error("maximum of {max} projected years reached")]
    ProjectionCapExceeded { max: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
