use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot derive a file name from {0}")]
    InvalidUrl(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
