//! Employee record operations and identity-to-employee resolution.
//!
//! Handlers stay thin; everything here works against the injected
//! [`DocumentStore`] and [`IdentityProvider`] so tests can run it over the
//! in-memory backends.

use futures_util::future::try_join;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::db::{Collection, CustomClaims, DocumentStore, IdentityProvider};
use crate::errors::AppError;
use crate::models::employee::{
    merge_update, Employee, EmployeePatch, NewEmployee, Role, SalaryZeroPolicy, COLLECTION,
};

/// An identity's linked employee record together with its claims.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessView {
    pub docs: Employee,
    pub employee_role: Option<CustomClaims>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub employee_role: Option<CustomClaims>,
    pub employee_email: Option<String>,
}

fn employees(store: &dyn DocumentStore) -> Collection<'_, Employee> {
    Collection::new(store, COLLECTION)
}

pub async fn add_employee(store: &dyn DocumentStore, body: NewEmployee) -> Result<Employee, AppError> {
    let employees = employees(store);
    let employee = body.into_employee(employees.new_id());
    employees.set(&employee.id, &employee).await?;
    Ok(employee)
}

pub async fn list_employees(store: &dyn DocumentStore) -> Result<Vec<Employee>, AppError> {
    Ok(employees(store).list().await?)
}

pub async fn get_employee(store: &dyn DocumentStore, id: &str) -> Result<Option<Employee>, AppError> {
    Ok(employees(store).get(id).await?)
}

/// Read the current document, merge `patch` into it and write the whole
/// result back.
///
/// A missing document merges against an empty record keyed by `id`, so the
/// write creates it. Read failures are server errors; a failed write is
/// reported as [`AppError::WriteFailed`].
pub async fn update_employee(
    store: &dyn DocumentStore,
    id: &str,
    patch: EmployeePatch,
    policy: SalaryZeroPolicy,
) -> Result<Employee, AppError> {
    let employees = employees(store);
    let current = employees.get(id).await?.unwrap_or_else(|| Employee {
        id: id.to_string(),
        ..Default::default()
    });

    let merged = merge_update(current, patch, policy);
    employees
        .set(id, &merged)
        .await
        .map_err(|err| AppError::WriteFailed(err.to_string()))?;
    Ok(merged)
}

pub async fn delete_employee(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
    employees(store)
        .delete(id)
        .await
        .map_err(|err| AppError::WriteFailed(err.to_string()))
}

/// Employee record linked to `uid` plus the identity's current claims.
///
/// The two lookups run concurrently. Claims and the record's `rol` are
/// returned as stored; they are not reconciled.
pub async fn resolve_access(
    store: &dyn DocumentStore,
    identity: &dyn IdentityProvider,
    uid: &str,
) -> Result<AccessView, AppError> {
    if uid.is_empty() {
        return Err(AppError::NotFound("no uid given".to_string()));
    }
    let employees = employees(store);

    let record = async {
        let matches = employees.where_eq("uid", uid).await?;
        if matches.len() > 1 {
            warn!("{} employee records share uid {}, using the first", matches.len(), uid);
        }
        matches
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("no employee linked to uid {}", uid)))
    };
    let claims = async { Ok::<_, AppError>(identity.get_user(uid).await?.custom_claims) };

    let (docs, employee_role) = try_join(record, claims).await?;
    Ok(AccessView { docs, employee_role })
}

/// Key of the first employee record whose email equals `email`.
///
/// An empty email never matches, even though records created without one
/// store `""`.
pub async fn resolve_id_by_email(store: &dyn DocumentStore, email: &str) -> Result<String, AppError> {
    if email.is_empty() {
        return Err(AppError::EmailNotFound);
    }
    let matches = employees(store).where_eq("email", email).await?;
    if matches.len() > 1 {
        warn!("{} employee records share email {}, using the first", matches.len(), email);
    }
    matches
        .into_iter()
        .next()
        .map(|employee| employee.id)
        .ok_or(AppError::EmailNotFound)
}

/// Overwrite the account's claims with `{"role": "employee"}` and read the
/// account back.
pub async fn register_employee(
    identity: &dyn IdentityProvider,
    uid: &str,
) -> Result<Registration, AppError> {
    let mut claims = CustomClaims::new();
    claims.insert("role".to_string(), Value::from(Role::Employee.as_str()));
    identity.set_custom_user_claims(uid, claims).await?;

    let user = identity.get_user(uid).await?;
    Ok(Registration {
        employee_role: user.custom_claims,
        employee_email: user.email,
    })
}
