pub mod access;
pub mod employee;
pub mod entry;

use actix_web::HttpResponse;
use log::error;

use crate::errors::AppError;

/// Log a failed operation before it is turned into a response.
pub(crate) fn logged(action: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        error!("{} failed: {}", action, err);
        err
    }
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Hey there!")
}
