//! Bridge error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Host bridge is not available")]
    Unavailable,

    #[error("Host rejected the request: {0}")]
    Rejected(String),
}
