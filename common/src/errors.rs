// Error handling framework

use thiserror::Error;

/// Menu fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Menu request failed: {0}")]
    RequestFailed(String),

    #[error("Menu request failed with status {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

/// Refresh cycle errors
///
/// The single error the refresh engine normalizes to the `Error` state.
/// Malformed rows are dropped during parsing and an empty selection is a
/// valid result, so neither surfaces here.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
