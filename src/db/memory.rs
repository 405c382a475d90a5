use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::identity::{CustomClaims, IdentityError, IdentityProvider, UserRecord};
use super::{Document, DocumentStore, StoreError};

/// Process-local document store, used for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` and `delete` fail until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Process-local identity provider with accounts seeded by the caller.
#[derive(Default)]
pub struct MemoryIdentity {
    users: RwLock<HashMap<String, UserRecord>>,
    fail_requests: AtomicBool,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent lookup and claims write fail until switched off again.
    pub fn fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), IdentityError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable("requests are disabled".to_string()));
        }
        Ok(())
    }

    pub async fn insert_user(&self, user: UserRecord) {
        self.users.write().await.insert(user.uid.clone(), user);
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn get_user(&self, uid: &str) -> Result<UserRecord, IdentityError> {
        self.check_available()?;
        self.users
            .read()
            .await
            .get(uid)
            .cloned()
            .ok_or_else(|| IdentityError::UserNotFound(uid.to_string()))
    }

    async fn set_custom_user_claims(
        &self,
        uid: &str,
        claims: CustomClaims,
    ) -> Result<(), IdentityError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        let user = users
            .get_mut(uid)
            .ok_or_else(|| IdentityError::UserNotFound(uid.to_string()))?;
        user.custom_claims = Some(claims);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn set_replaces_whole_document() {
        let store = MemoryStore::new();
        store
            .set("employees", "a", doc(json!({"name": "A", "salary": 1})))
            .await
            .unwrap();
        store
            .set("employees", "a", doc(json!({"name": "B"})))
            .await
            .unwrap();

        let stored = store.get("employees", "a").await.unwrap().unwrap();
        assert_eq!(Value::Object(stored), json!({"name": "B"}));
    }

    #[tokio::test]
    async fn find_eq_returns_matches_in_key_order() {
        let store = MemoryStore::new();
        store.set("employees", "b", doc(json!({"id": "b", "uid": "u1"}))).await.unwrap();
        store.set("employees", "a", doc(json!({"id": "a", "uid": "u1"}))).await.unwrap();
        store.set("employees", "c", doc(json!({"id": "c", "uid": "u2"}))).await.unwrap();

        let hits = store.find_eq("employees", "uid", &json!("u1")).await.unwrap();
        let ids: Vec<_> = hits.iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b")]);
    }

    #[tokio::test]
    async fn failed_writes_leave_data_untouched() {
        let store = MemoryStore::new();
        store.set("entries", "x", doc(json!({"title": "t"}))).await.unwrap();
        store.fail_writes(true);

        assert!(store.delete("entries", "x").await.is_err());
        assert!(store.get("entries", "x").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn claims_are_replaced_not_merged() {
        let identity = MemoryIdentity::new();
        identity
            .insert_user(UserRecord {
                uid: "u1".into(),
                email: Some("jo@x.com".into()),
                custom_claims: Some(doc(json!({"admin": true}))),
            })
            .await;

        identity
            .set_custom_user_claims("u1", doc(json!({"role": "employee"})))
            .await
            .unwrap();

        let user = identity.get_user("u1").await.unwrap();
        assert_eq!(user.custom_claims, Some(doc(json!({"role": "employee"}))));
    }

    #[tokio::test]
    async fn disabled_identity_reports_unavailable() {
        let identity = MemoryIdentity::new();
        identity.fail_requests(true);

        let err = identity.set_custom_user_claims("u1", CustomClaims::new()).await.unwrap_err();
        assert!(matches!(err, IdentityError::Unavailable(_)));
    }

    #[tokio::test]
    async fn unknown_uid_is_reported() {
        let identity = MemoryIdentity::new();
        let err = identity.get_user("ghost").await.unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound(uid) if uid == "ghost"));
    }
}
