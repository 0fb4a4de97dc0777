use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before the poll loop starts; never raised mid-loop.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Broker communication failure. Fatal to a running poll loop and not
    /// retried here.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Confirmation prompt error: {0}")]
    Prompt(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
