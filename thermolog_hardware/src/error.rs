use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("acquisition not running")]
    Stopped,
    #[error("acquisition already started")]
    AlreadyStarted,
    #[error("acquisition source torn down")]
    TornDown,
    #[error("driver error: {0}")]
    Driver(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
