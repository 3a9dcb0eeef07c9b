use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotorError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[cfg(feature = "motor")]
    #[error("gpio error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}

pub type Result<T, E = MotorError> = std::result::Result<T, E>;
