// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::vision::{ImageError, StylizeError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    ValidationError {
        field: String,
        message: String,
    },
    /// `size` is unknown when the body was cut off while streaming
    PayloadTooLarge {
        size: Option<usize>,
        limit: usize,
    },
    ServiceUnavailable(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::PayloadTooLarge { size, limit } => {
                let mut details = HashMap::new();
                if let Some(size) = size {
                    details.insert("size".to_string(), serde_json::Value::Number((*size).into()));
                }
                details.insert(
                    "limit".to_string(),
                    serde_json::Value::Number((*limit).into()),
                );
                (
                    "payload_too_large",
                    format!("Upload exceeds maximum size of {} bytes", limit),
                    Some(details),
                )
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) | ApiError::ValidationError { .. } => 400,
            ApiError::PayloadTooLarge { .. } => 413,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::PayloadTooLarge {
                size: Some(size),
                limit,
            } => write!(f, "Payload too large: {} bytes (max: {} bytes)", size, limit),
            ApiError::PayloadTooLarge { size: None, limit } => {
                write!(f, "Payload too large (max: {} bytes)", limit)
            }
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::TooLarge(size, limit) => ApiError::PayloadTooLarge {
                size: Some(size),
                limit,
            },
            ImageError::EncodeFailed(msg) => ApiError::InternalError(msg),
            other => ApiError::ValidationError {
                field: "image".to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<StylizeError> for ApiError {
    fn from(err: StylizeError) -> Self {
        match err {
            StylizeError::UnknownStyle { .. } => ApiError::ValidationError {
                field: "style".to_string(),
                message: err.to_string(),
            },
            StylizeError::ImageTooSmall { .. } => ApiError::ValidationError {
                field: "image".to_string(),
                message: err.to_string(),
            },
            StylizeError::ModelUnavailable => ApiError::ServiceUnavailable(err.to_string()),
            StylizeError::Inference(_) | StylizeError::InvalidModelOutput(_) => {
                ApiError::InternalError(err.to_string())
            }
            StylizeError::Image(image_err) => image_err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!("[{}] {}", request_id, self);
        } else {
            tracing::warn!("[{}] {}", request_id, self);
        }

        (status, Json(self.to_response(Some(request_id)))).into_response()
    }
}
