use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("a nested group must be at least one column wide")]
    ZeroWidth,

    #[error("no width hint available; pass an explicit column count for nested groups")]
    MissingWidth,
}

pub type Result<T> = std::result::Result<T, Error>;
