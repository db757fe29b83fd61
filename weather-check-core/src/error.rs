use thiserror::Error;

use crate::{assertions::AssertionError, client::ClientError, resources::ResourceError};

/// Anything that can stop a scenario short of a clean pass.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Assertion(#[from] AssertionError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Unknown {kind} '{name}'. Supported: {supported}.")]
    Unknown { kind: &'static str, name: String, supported: String },
}

pub type Result<T, E = SuiteError> = std::result::Result<T, E>;
