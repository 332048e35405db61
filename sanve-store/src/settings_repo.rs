use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use sanve_domain::repository::{RepoError, SettingsRepository};
use sanve_domain::settings::{BankInfo, PricingConfig, SmtpCredentials};

pub struct SqliteSettingsRepository {
    pool: Pool<Sqlite>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PricingRow {
    min_price: i64,
    max_price: i64,
    loading_time: i64,
}

#[derive(sqlx::FromRow)]
struct BankRow {
    bin: String,
    account_number: String,
    account_name: String,
}

#[derive(sqlx::FromRow)]
struct SmtpRow {
    email: String,
    password: String,
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn pricing(&self) -> Result<PricingConfig, RepoError> {
        let row: PricingRow =
            sqlx::query_as("SELECT min_price, max_price, loading_time FROM config LIMIT 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(PricingConfig {
            min_price: row.min_price,
            max_price: row.max_price,
            loading_time: row.loading_time,
        })
    }

    async fn replace_pricing(&self, config: &PricingConfig) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE config SET min_price = ?1, max_price = ?2, loading_time = ?3 WHERE id = 1",
        )
        .bind(config.min_price)
        .bind(config.max_price)
        .bind(config.loading_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn bank_info(&self) -> Result<BankInfo, RepoError> {
        let row: BankRow =
            sqlx::query_as("SELECT bin, account_number, account_name FROM bank_info LIMIT 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(BankInfo {
            bin: row.bin,
            account_number: row.account_number,
            account_name: row.account_name,
        })
    }

    async fn replace_bank_info(&self, info: &BankInfo) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE bank_info SET bin = ?1, account_number = ?2, account_name = ?3 WHERE id = 1",
        )
        .bind(&info.bin)
        .bind(&info.account_number)
        .bind(&info.account_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn smtp_credentials(&self) -> Result<SmtpCredentials, RepoError> {
        let row: SmtpRow = sqlx::query_as("SELECT email, password FROM smtp_config LIMIT 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(SmtpCredentials {
            email: row.email,
            password: row.password,
        })
    }

    async fn replace_smtp_credentials(
        &self,
        credentials: &SmtpCredentials,
    ) -> Result<(), RepoError> {
        sqlx::query("UPDATE smtp_config SET email = ?1, password = ?2 WHERE id = 1")
            .bind(&credentials.email)
            .bind(&credentials.password)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn verify_admin(&self, username: &str, password: &str) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_credentials WHERE username = ?1 AND password = ?2",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn username_taken(&self, username: &str, other_than: &str) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_credentials WHERE username = ?1 AND username != ?2",
        )
        .bind(username)
        .bind(other_than)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn replace_admin(
        &self,
        current_username: &str,
        new_username: &str,
        new_password: &str,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE admin_credentials SET username = ?1, password = ?2 WHERE username = ?3",
        )
        .bind(new_username)
        .bind(new_password)
        .bind(current_username)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
