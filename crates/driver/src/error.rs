use thiserror::Error;

use crate::core::EngineError;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to start descent runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
