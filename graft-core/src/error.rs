// Error types for the graft registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Nothing is cached, registered, or default-constructible for the key.
    #[error(
        "Failed to inject dependency for key: {0}. Either confirm that {0} implements `Injectable`, or register a mapping or provider for it."
    )]
    UnregisteredKey(String),
}

impl Error {
    /// The key named by this error.
    pub fn key(&self) -> &str {
        match self {
            Error::UnregisteredKey(key) => key,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
