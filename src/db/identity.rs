use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Arbitrary claims attached to an identity account, e.g. `{"role": "employee"}`.
pub type CustomClaims = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    pub email: Option<String>,
    pub custom_claims: Option<CustomClaims>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("no identity account for uid {0}")]
    UserNotFound(String),
    #[error("identity backend error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

/// Account lookup and custom-claims storage of the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<UserRecord, IdentityError>;

    /// Replace the account's claims with `claims`. Prior claims are discarded.
    async fn set_custom_user_claims(
        &self,
        uid: &str,
        claims: CustomClaims,
    ) -> Result<(), IdentityError>;
}
