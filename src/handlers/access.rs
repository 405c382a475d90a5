use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::logged;
use crate::services::employee as service;
use crate::state::AppState;

// Missing parameters read as empty so the request still reaches the
// operation and fails with its own error shape.
#[derive(Deserialize)]
pub struct UidQuery {
    #[serde(default)]
    uid: String,
}

#[derive(Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    email: String,
}

pub async fn allow_employee_access(
    state: web::Data<AppState>,
    query: web::Query<UidQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let view = service::resolve_access(state.store.as_ref(), state.identity.as_ref(), &query.uid)
        .await
        .map_err(logged("resolve access"))?;

    Ok(HttpResponse::Ok().json(view))
}

// Responds with the bare employee id for an email.
pub async fn create_new_user(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = service::resolve_id_by_email(state.store.as_ref(), &query.email)
        .await
        .map_err(logged("resolve id by email"))?;

    Ok(HttpResponse::Ok().json(id))
}

pub async fn register_new_employee_account(
    state: web::Data<AppState>,
    query: web::Query<UidQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let registration = service::register_employee(state.identity.as_ref(), &query.uid)
        .await
        .map_err(logged("register employee"))?;

    Ok(HttpResponse::Ok().json(registration))
}
