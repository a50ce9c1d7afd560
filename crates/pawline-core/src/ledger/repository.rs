//! Ledger repository for persistent storage of acknowledgements.

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::Result;
use crate::account::AccountId;
use crate::inquiry::InquiryId;

/// Repository for acknowledged inquiry IDs.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS acknowledged_inquiries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id TEXT NOT NULL,
                inquiry_id TEXT NOT NULL,
                acknowledged_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(account_id, inquiry_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for loading one account's ledger at startup
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_acknowledged_account
            ON acknowledged_inquiries(account_id)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record an acknowledgement. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn add(&self, account_id: &AccountId, inquiry_id: &InquiryId) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR IGNORE INTO acknowledged_inquiries (account_id, inquiry_id)
            VALUES (?, ?)
            ",
        )
        .bind(account_id.as_str())
        .bind(inquiry_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Whether an acknowledgement exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn contains(&self, account_id: &AccountId, inquiry_id: &InquiryId) -> Result<bool> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM acknowledged_inquiries
            WHERE account_id = ? AND inquiry_id = ?
            ",
        )
        .bind(account_id.as_str())
        .bind(inquiry_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Load all acknowledged inquiry IDs for one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_ids(&self, account_id: &AccountId) -> Result<Vec<InquiryId>> {
        let rows = sqlx::query(
            r"
            SELECT inquiry_id FROM acknowledged_inquiries
            WHERE account_id = ?
            ",
        )
        .bind(account_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| InquiryId::new(r.get::<String, _>("inquiry_id")))
            .collect())
    }

    /// Delete every acknowledgement for one account (logout/reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn clear(&self, account_id: &AccountId) -> Result<()> {
        sqlx::query(
            r"
            DELETE FROM acknowledged_inquiries
            WHERE account_id = ?
            ",
        )
        .bind(account_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_contains() {
        let repo = LedgerRepository::in_memory().await.unwrap();
        let account = AccountId::new("acct-1");
        let inquiry = InquiryId::new("inq-1");

        assert!(!repo.contains(&account, &inquiry).await.unwrap());
        repo.add(&account, &inquiry).await.unwrap();
        assert!(repo.contains(&account, &inquiry).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_add_is_ignored() {
        let repo = LedgerRepository::in_memory().await.unwrap();
        let account = AccountId::new("acct-1");
        let inquiry = InquiryId::new("inq-1");

        repo.add(&account, &inquiry).await.unwrap();
        repo.add(&account, &inquiry).await.unwrap();

        assert_eq!(repo.load_ids(&account).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_only_touches_one_account() {
        let repo = LedgerRepository::in_memory().await.unwrap();
        let mine = AccountId::new("acct-1");
        let theirs = AccountId::new("acct-2");
        let inquiry = InquiryId::new("inq-1");

        repo.add(&mine, &inquiry).await.unwrap();
        repo.add(&theirs, &inquiry).await.unwrap();

        repo.clear(&mine).await.unwrap();

        assert!(!repo.contains(&mine, &inquiry).await.unwrap());
        assert!(repo.contains(&theirs, &inquiry).await.unwrap());
    }
}
