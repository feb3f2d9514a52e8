use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("io_error - {0}")]
    Io(String),
    #[error("lock_error - {0}")]
    Lock(String),
    #[error("decode_error - {0}")]
    Decode(String),
    #[error("not_found - {0}")]
    NotFound(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn lock<M: Into<String>>(message: M) -> Self {
        Self::Lock(message.into())
    }

    pub fn decode<M: Into<String>>(message: M) -> Self {
        Self::Decode(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
            Self::Lock(_) => "lock_error",
            Self::Decode(_) => "decode_error",
            Self::NotFound(_) => "not_found",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::InvalidData(message)
            | Self::Io(message)
            | Self::Lock(message)
            | Self::Decode(message)
            | Self::NotFound(message) => message,
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return Self::io(err.to_string());
        }
        Self::decode(err.to_string())
    }
}
