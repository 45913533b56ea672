use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsFecError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, RsFecError>;
