// Error types for the store, the matcher, the model fetcher and the HTTP layer.
use thiserror::Error;

pub mod fetch;
pub mod matching;
pub mod response;
pub mod store;

pub use fetch::{FetchError, FetchResult};
pub use matching::{MatchError, MatchResult};
pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field was absent.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),
}

pub type AppResult<T> = Result<T, AppError>;
