use thiserror::Error;

use crate::payload::PayloadShape;
use crate::response::ErrorBody;

pub(crate) const EMPTY_PAYLOAD_MESSAGE: &str = "File data is empty or invalid";
pub(crate) const UNSUPPORTED_SHAPE_MESSAGE: &str = "Unsupported file data format received from API";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload normalized to zero bytes")]
    EmptyPayload,
    #[error("unsupported payload shape: {shape}")]
    UnsupportedPayloadShape { shape: PayloadShape },
}

/// Terminal failure of the classification pipeline.
///
/// Both variants are final for the request. Re-running the pipeline on the
/// same input gives the same result, so callers must not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl ClassifyError {
    /// HTTP status an endpoint should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ClassifyError::Payload(PayloadError::EmptyPayload) => 404,
            ClassifyError::Payload(PayloadError::UnsupportedPayloadShape { .. }) => 500,
        }
    }

    /// Message safe to expose to the browser. Shape details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ClassifyError::Payload(PayloadError::EmptyPayload) => EMPTY_PAYLOAD_MESSAGE,
            ClassifyError::Payload(PayloadError::UnsupportedPayloadShape { .. }) => {
                UNSUPPORTED_SHAPE_MESSAGE
            }
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody::new(self.public_message())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read classifier config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid classifier config: {0}")]
    Parse(#[from] toml::de::Error),
}
