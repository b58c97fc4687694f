use actix_web::{error, HttpResponse};
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use serde::Serialize;
use crate::server::lifecycle::error::LifecycleError;

#[derive(Debug, Display, Error)]
pub(crate) enum CustomError {
    #[display("{message}")]
    BadRequest { message: String },
    #[display("{message}")]
    ResourceNotFound { message: String },
    #[display("{message}")]
    Conflict { message: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub result_code: Option<String>,
    pub message: String,
}

impl CustomError {
    fn result_code(&self) -> &'static str {
        match *self {
            CustomError::BadRequest { .. } => "V0001",
            CustomError::ResourceNotFound { .. } => "N0001",
            CustomError::Conflict { .. } => "C0001",
        }
    }
}

impl From<LifecycleError> for CustomError {
    fn from(e: LifecycleError) -> Self {
        let message = e.to_string();
        match e {
            LifecycleError::Validation { .. } => CustomError::BadRequest { message },
            LifecycleError::NotFound { .. } => CustomError::ResourceNotFound { message },
            LifecycleError::InvalidTransition { .. } | LifecycleError::Closed { .. } => {
                CustomError::Conflict { message }
            }
        }
    }
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            CustomError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            CustomError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            result_code: Some(self.result_code().to_string()),
            message: self.to_string(),
        })
    }
}
