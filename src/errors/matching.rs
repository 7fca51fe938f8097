use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("descriptor of {username} has {found} values, query has {expected}")]
    DimensionMismatch {
        username: String,
        expected: usize,
        found: usize,
    },
}

pub type MatchResult<T> = Result<T, MatchError>;
