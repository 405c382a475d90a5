use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::db::{IdentityError, StoreError};

pub const EMAIL_NOT_FOUND_MESSAGE: &str = "Email not found in database";

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    EmailNotFound,
    WriteFailed(String),
    Store(StoreError),
    Identity(IdentityError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct StatusResponse<'a> {
    status: &'a str,
    message: String,
}

#[derive(Serialize)]
struct CodedErrorResponse<'a> {
    error: &'a str,
    message: &'a str,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::EmailNotFound => write!(f, "{}", EMAIL_NOT_FOUND_MESSAGE),
            AppError::WriteFailed(msg) => write!(f, "{}", msg),
            AppError::Store(err) => write!(f, "Store Error: {}", err),
            AppError::Identity(err) => write!(f, "Identity Error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        AppError::Identity(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmailNotFound | AppError::WriteFailed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::Store(_) | AppError::Identity(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::EmailNotFound => HttpResponse::BadRequest().json(CodedErrorResponse {
                error: "emailNotFound",
                message: EMAIL_NOT_FOUND_MESSAGE,
            }),
            AppError::WriteFailed(msg) => HttpResponse::BadRequest().json(StatusResponse {
                status: "error",
                message: msg.clone(),
            }),
            _ => HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: self.to_string(),
            }),
        }
    }
}
