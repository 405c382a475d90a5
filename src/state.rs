use std::sync::Arc;

use crate::db::{DocumentStore, IdentityProvider};
use crate::models::employee::SalaryZeroPolicy;

/// Backends shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub salary_zero: SalaryZeroPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        salary_zero: SalaryZeroPolicy,
    ) -> Self {
        Self {
            store,
            identity,
            salary_zero,
        }
    }
}
