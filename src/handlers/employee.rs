use actix_web::{web, HttpResponse};
use serde_json::json;

use super::logged;
use crate::models::employee::{EmployeePatch, NewEmployee};
use crate::services::employee as service;
use crate::state::AppState;

pub async fn create_employee(
    state: web::Data<AppState>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service::add_employee(state.store.as_ref(), new_employee.into_inner())
        .await
        .map_err(logged("add employee"))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "Success",
        "message": "Employee added successfully",
        "data": employee,
    })))
}

pub async fn get_employees(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let employees = service::list_employees(state.store.as_ref())
        .await
        .map_err(logged("list employees"))?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service::get_employee(state.store.as_ref(), &employee_id)
        .await
        .map_err(logged("get employee"))?;

    match employee {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::Ok().json(json!({}))),
    }
}

pub async fn update_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
    updates: web::Json<EmployeePatch>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service::update_employee(
        state.store.as_ref(),
        &employee_id,
        updates.into_inner(),
        state.salary_zero,
    )
    .await
    .map_err(logged("update employee"))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Employee updated successfully",
        "data": employee,
    })))
}

pub async fn delete_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    service::delete_employee(state.store.as_ref(), &employee_id)
        .await
        .map_err(logged("delete employee"))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Employee deleted successfully",
    })))
}
