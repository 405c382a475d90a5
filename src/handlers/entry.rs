use actix_web::{web, HttpResponse};
use serde_json::json;

use super::logged;
use crate::db::Collection;
use crate::errors::AppError;
use crate::models::entry::{Entry, EntryPatch, NewEntry, COLLECTION};
use crate::state::AppState;

fn entries(state: &AppState) -> Collection<'_, Entry> {
    Collection::new(state.store.as_ref(), COLLECTION)
}

pub async fn add_entry(
    state: web::Data<AppState>,
    new_entry: web::Json<NewEntry>,
) -> Result<HttpResponse, actix_web::Error> {
    let entries = entries(&state);
    let NewEntry { title, text } = new_entry.into_inner();
    let entry = Entry {
        id: entries.new_id(),
        title,
        text,
    };

    entries
        .set(&entry.id, &entry)
        .await
        .map_err(|err| logged("add entry")(AppError::from(err)))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "entry added successfully",
        "data": entry,
    })))
}

pub async fn get_all_entries(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let all = entries(&state)
        .list()
        .await
        .map_err(|err| logged("list entries")(AppError::from(err)))?;

    Ok(HttpResponse::Ok().json(all))
}

pub async fn update_entry(
    state: web::Data<AppState>,
    entry_id: web::Path<String>,
    updates: web::Json<EntryPatch>,
) -> Result<HttpResponse, actix_web::Error> {
    let entries = entries(&state);
    let current = entries
        .get(&entry_id)
        .await
        .map_err(|err| logged("read entry")(AppError::from(err)))?
        .unwrap_or_else(|| Entry {
            id: entry_id.to_string(),
            ..Default::default()
        });

    let entry = current.apply(updates.into_inner());
    entries
        .set(&entry_id, &entry)
        .await
        .map_err(|err| logged("update entry")(AppError::WriteFailed(err.to_string())))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "entry updated successfully",
        "data": entry,
    })))
}

pub async fn delete_entry(
    state: web::Data<AppState>,
    entry_id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    entries(&state)
        .delete(&entry_id)
        .await
        .map_err(|err| logged("delete entry")(AppError::WriteFailed(err.to_string())))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "entry deleted successfully",
    })))
}
