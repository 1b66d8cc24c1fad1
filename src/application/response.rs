use http::StatusCode;
use serde::Serialize;

use crate::error::{AppError, Result};

/// Outcome of a successful operation: the confirmation message shown to
/// the operator plus the typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: String,
    pub payload: T,
}

impl<T> Reply<T> {
    pub fn new(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }
}

impl Reply<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(message, ())
    }
}

/// Uniform envelope for every operation, whatever the front end: an HTTP
/// layer serializes it as the response body, a CLI prints the message.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    pub fn from_result(result: Result<Reply<T>>) -> Self {
        match result {
            Ok(reply) => Self {
                success: true,
                message: reply.message,
                payload: Some(reply.payload),
                status: StatusCode::OK.as_u16(),
            },
            Err(err) => Self::from_error(err),
        }
    }

    pub fn from_error(err: AppError) -> Self {
        Self {
            success: false,
            message: err.public_message(),
            payload: None,
            status: err.status_code().as_u16(),
        }
    }
}

impl<T> From<Result<Reply<T>>> for ApiResponse<T> {
    fn from(result: Result<Reply<T>>) -> Self {
        Self::from_result(result)
    }
}
