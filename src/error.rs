use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),
    #[error("Argument {key} is not a {expected}")]
    WrongArgumentType { key: String, expected: &'static str },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Malformed price: {0}")]
    MalformedPrice(String),
    #[error("Remote callback unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
