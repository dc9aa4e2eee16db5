use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MsfError {
    #[error("Invalid MSF format: {0}")]
    InvalidFormat(String),

    #[error("MSF position does not fit in a sector count: {0}")]
    Overflow(String),
}

pub type MsfResult<T> = Result<T, MsfError>;
