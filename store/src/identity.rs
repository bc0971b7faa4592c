use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Account record held by the identity provider.
#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Email/password identity boundary. Mirrors the surface consumed from the
/// managed identity platform: sign-up, credential check and display-name
/// update.
#[async_trait]
pub trait IdentityProvider: Send + Sync + Debug {
    /// Register a new account. The email must be unused.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> StoreResult<UserAccount>;

    /// Check credentials and return the matching account.
    async fn verify_password(&self, email: &str, password: &str) -> StoreResult<UserAccount>;

    async fn get_user(&self, uid: &str) -> StoreResult<UserAccount>;

    async fn update_display_name(&self, uid: &str, display_name: &str) -> StoreResult<UserAccount>;
}

/// Type alias for Arc-wrapped IdentityProvider trait objects
pub type IdentityProviderRef = Arc<dyn IdentityProvider>;

/// Internal record; the password is kept as-is because this adapter is a
/// development stand-in for the managed provider, which owns hashing.
#[derive(Debug, Clone)]
struct StoredAccount {
    account: UserAccount,
    password: String,
}

/// In-memory implementation of IdentityProvider
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, StoredAccount>>> {
        self.accounts
            .read()
            .map_err(|e| StoreError::StorageError(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, StoredAccount>>> {
        self.accounts
            .write()
            .map_err(|e| StoreError::StorageError(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> StoreResult<UserAccount> {
        let mut accounts = self.write()?;

        if accounts.values().any(|a| a.account.email == email) {
            return Err(StoreError::AlreadyExists(email.to_string()));
        }

        let account = UserAccount {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        };
        accounts.insert(
            account.uid.clone(),
            StoredAccount {
                account: account.clone(),
                password: password.to_string(),
            },
        );
        debug!(uid = %account.uid, "Registered account");

        Ok(account)
    }

    async fn verify_password(&self, email: &str, password: &str) -> StoreResult<UserAccount> {
        let accounts = self.read()?;

        accounts
            .values()
            .find(|a| a.account.email == email && a.password == password)
            .map(|a| a.account.clone())
            .ok_or(StoreError::InvalidCredentials)
    }

    async fn get_user(&self, uid: &str) -> StoreResult<UserAccount> {
        let accounts = self.read()?;

        accounts
            .get(uid)
            .map(|a| a.account.clone())
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))
    }

    async fn update_display_name(&self, uid: &str, display_name: &str) -> StoreResult<UserAccount> {
        let mut accounts = self.write()?;

        let stored = accounts
            .get_mut(uid)
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        stored.account.display_name = display_name.to_string();

        Ok(stored.account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::test;

    #[test]
    async fn sign_up_and_verify() {
        let identity = InMemoryIdentityProvider::new();

        let account = identity
            .sign_up("ana@escola.br", "segredo", "Ana")
            .await
            .unwrap();
        assert_eq!(account.email, "ana@escola.br");

        let verified = identity
            .verify_password("ana@escola.br", "segredo")
            .await
            .unwrap();
        assert_eq!(verified.uid, account.uid);
    }

    #[test]
    async fn duplicate_email_is_rejected() {
        let identity = InMemoryIdentityProvider::new();
        identity.sign_up("ana@escola.br", "a", "Ana").await.unwrap();

        let result = identity.sign_up("ana@escola.br", "b", "Outra Ana").await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[test]
    async fn wrong_password_is_invalid_credentials() {
        let identity = InMemoryIdentityProvider::new();
        identity
            .sign_up("ana@escola.br", "segredo", "Ana")
            .await
            .unwrap();

        let result = identity.verify_password("ana@escola.br", "errada").await;
        assert!(matches!(result, Err(StoreError::InvalidCredentials)));
    }

    #[test]
    async fn display_name_update_is_visible() {
        let identity = InMemoryIdentityProvider::new();
        let account = identity
            .sign_up("ana@escola.br", "segredo", "Ana")
            .await
            .unwrap();

        identity
            .update_display_name(&account.uid, "Ana Clara")
            .await
            .unwrap();
        let fetched = identity.get_user(&account.uid).await.unwrap();
        assert_eq!(fetched.display_name, "Ana Clara");
    }
}
