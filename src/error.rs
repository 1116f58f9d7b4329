use thiserror::Error;

use crate::cloud::CloudError;
use crate::logging::LoggingError;
use crate::model::ModelError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 3,
            Self::Model(_) => 4,
            Self::Cloud(_) => 5,
            Self::Logging(_) => 7,
            Self::Io(_) => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
