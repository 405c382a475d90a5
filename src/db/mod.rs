pub mod identity;
pub mod memory;
pub mod postgres;

use std::marker::PhantomData;

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use identity::{CustomClaims, IdentityError, IdentityProvider, UserRecord};
pub use memory::{MemoryIdentity, MemoryStore};
pub use postgres::{PgDocumentStore, PgIdentityProvider};

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

const AUTO_ID_LEN: usize = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Access to named collections of JSON documents.
///
/// Every call is independent; there are no transactions spanning calls.
/// `list` and `find_eq` return documents ordered by key, so callers that take
/// the first match of a query get a stable answer when duplicates exist.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Generate a fresh document key.
    fn new_id(&self) -> String {
        auto_id()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Replace the whole document at `id`, creating it if missing.
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Remove the document at `id`. Removing a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Documents whose top-level `field` equals `value`.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;
}

/// Random alphanumeric key in the same shape as managed-store auto ids.
pub fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}

/// Typed view over one collection of a [`DocumentStore`].
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    name: &'static str,
    _record: PhantomData<T>,
}

impl<'a, T> Collection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a dyn DocumentStore, name: &'static str) -> Self {
        Self {
            store,
            name,
            _record: PhantomData,
        }
    }

    pub fn new_id(&self) -> String {
        self.store.new_id()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(self.name, id).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.store
            .list(self.name)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn set(&self, id: &str, record: &T) -> Result<(), StoreError> {
        self.store.set(self.name, id, to_document(record)?).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(self.name, id).await
    }

    pub async fn where_eq(&self, field: &str, value: impl Into<Value>) -> Result<Vec<T>, StoreError> {
        self.store
            .find_eq(self.name, field, &value.into())
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }
}

pub fn to_document<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_ids_are_twenty_alphanumerics() {
        let id = auto_id();
        assert_eq!(id.len(), AUTO_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, auto_id());
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert!(matches!(to_document(&42), Err(StoreError::NotAnObject)));
    }
}
