//! Business operations invoked by the routes.

use thiserror::Error;

use crate::client::errors::ClientError;
use crate::forms::FormError;

pub mod trucks;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Truck not found")]
    NotFound,

    #[error("Form error: {0}")]
    Form(String),

    #[error("Backend error: {0}")]
    Client(ClientError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound => ServiceError::NotFound,
            other => ServiceError::Client(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
