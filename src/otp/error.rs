use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
