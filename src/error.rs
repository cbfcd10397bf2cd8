use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Control mode has not been confirmed")]
    NotConfirmed,

    #[error("Invalid control mode configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ControlError>;
