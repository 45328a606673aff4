//! Account Repository

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, record_key};
use crate::db::models::{Account, AccountCreate, AccountUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ACCOUNT_TABLE: &str = "account";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active accounts
    pub async fn find_active(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE is_active = true")
            .await?
            .take(0)?;
        Ok(accounts)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Account>> {
        let key = record_key(ACCOUNT_TABLE, id);
        let account: Option<Account> = self.base.db().select((ACCOUNT_TABLE, key)).await?;
        Ok(account)
    }

    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        let account = Account {
            id: None,
            name: data.name,
            credentials_ref: data.credentials_ref,
            is_active: true,
            created_at: Some(now_rfc3339()),
            updated_at: None,
        };

        let created: Option<Account> = self
            .base
            .db()
            .create(ACCOUNT_TABLE)
            .content(account)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }

    pub async fn update(&self, id: &str, data: AccountUpdate) -> RepoResult<Account> {
        let key = record_key(ACCOUNT_TABLE, id);

        let mut patch = serde_json::Map::new();
        if let Some(v) = data.name {
            patch.insert("name".into(), v.into());
        }
        if let Some(v) = data.credentials_ref {
            patch.insert("credentials_ref".into(), v.into());
        }
        if let Some(v) = data.is_active {
            patch.insert("is_active".into(), v.into());
        }
        patch.insert("updated_at".into(), now_rfc3339().into());

        let updated: Option<Account> = self
            .base
            .db()
            .update((ACCOUNT_TABLE, key))
            .merge(serde_json::Value::Object(patch))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Soft delete: accounts are deactivated, never removed
    pub async fn delete(&self, id: &str) -> RepoResult<Account> {
        self.update(
            id,
            AccountUpdate {
                name: None,
                credentials_ref: None,
                is_active: Some(false),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn soft_delete_hides_account_from_active_listing() {
        let database = db::open_in_memory().await.unwrap();
        let repo = AccountRepository::new(database);

        let account = repo
            .create(AccountCreate {
                name: "main".into(),
                credentials_ref: None,
            })
            .await
            .unwrap();
        assert!(account.is_active);
        assert_eq!(repo.find_active().await.unwrap().len(), 1);

        let id = account.id.unwrap().to_string();
        let deleted = repo.delete(&id).await.unwrap();
        assert!(!deleted.is_active);
        assert!(repo.find_active().await.unwrap().is_empty());

        // Row still exists
        assert!(repo.find_by_id(&id).await.unwrap().is_some());
    }
}
