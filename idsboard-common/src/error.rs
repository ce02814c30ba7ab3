use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::{IntoResponse, Response};
use poem_openapi::payload::Json;
use poem_openapi::registry::{MetaResponses, Registry};
use poem_openapi::{ApiResponse, Object};
use tracing::error;

use crate::validation::{FieldViolation, ValidationError};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("document store is not available: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored document {id} could not be decoded: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum IdsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IdsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// JSON body of every error response.
#[derive(Object, Debug)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[oai(skip_serializing_if_is_none)]
    pub fields: Option<Vec<FieldViolation>>,
}

impl ErrorBody {
    fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_owned(),
            message: message.into(),
            fields: None,
        }
    }
}

#[derive(ApiResponse)]
enum ErrorResponse {
    /// The payload is well-formed JSON but violates field constraints
    #[oai(status = 422)]
    Validation(Json<ErrorBody>),
    /// The document store is unavailable or failed
    #[oai(status = 500)]
    Storage(Json<ErrorBody>),
}

impl ResponseError for IdsError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response {
        match self {
            Self::Validation(err) => ErrorResponse::Validation(Json(ErrorBody {
                fields: Some(err.violations.clone()),
                ..ErrorBody::new(self.kind(), "request payload failed validation")
            })),
            Self::Storage(StorageError::Unavailable(_)) => ErrorResponse::Storage(Json(
                ErrorBody::new(self.kind(), "document store is not available"),
            )),
            Self::Storage(_) => {
                error!(error = %self, "Request failed");
                ErrorResponse::Storage(Json(ErrorBody::new(self.kind(), "document store error")))
            }
        }
        .into_response()
    }
}

impl ApiResponse for IdsError {
    fn meta() -> MetaResponses {
        ErrorResponse::meta()
    }

    fn register(registry: &mut Registry) {
        ErrorResponse::register(registry);
    }
}

/// Renders errors raised by the HTTP framework before a handler runs
/// (unparseable body, missing content type, unknown route) in the same shape
/// as [`IdsError`] responses.
pub fn framework_error_response(err: poem::Error) -> Response {
    if err.is::<IdsError>() {
        return err.into_response();
    }

    let status = err.status();
    let kind = match status {
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::METHOD_NOT_ALLOWED => "method_not_allowed",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        status if status.is_server_error() => "internal_error",
        _ => "bad_request",
    };
    let message = if status.is_server_error() {
        error!(error = %err, "Request failed");
        "internal server error".to_owned()
    } else {
        err.to_string()
    };

    Json(ErrorBody::new(kind, message))
        .with_status(status)
        .into_response()
}
