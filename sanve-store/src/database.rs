use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Sqlite>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let options =
            SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the schema and seeds each singleton table with its initial
    /// row. Safe to run on every startup.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        info!("Initializing database schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS config (
                id INTEGER PRIMARY KEY,
                min_price INTEGER NOT NULL,
                max_price INTEGER NOT NULL,
                loading_time INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bank_info (
                id INTEGER PRIMARY KEY,
                bin TEXT NOT NULL,
                account_number TEXT NOT NULL,
                account_name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS smtp_config (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_credentials (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS history_booking (
                id INTEGER PRIMARY KEY,
                ip TEXT NOT NULL,
                flight_id TEXT NOT NULL,
                amount INTEGER NOT NULL,
                passengers TEXT NOT NULL,
                contact_info TEXT NOT NULL,
                airline TEXT NOT NULL,
                departure_time TEXT NOT NULL,
                arrival_time TEXT NOT NULL,
                origin TEXT NOT NULL,
                destination TEXT NOT NULL,
                date TEXT NOT NULL,
                flight_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        self.seed_singletons().await?;

        info!("Database schema ready.");
        Ok(())
    }

    async fn seed_singletons(&self) -> Result<(), sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM config")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO config (min_price, max_price, loading_time) VALUES (?1, ?2, ?3)")
                .bind(0i64)
                .bind(10_000i64)
                .bind(2_000i64)
                .execute(&self.pool)
                .await?;
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bank_info")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO bank_info (bin, account_number, account_name) VALUES ('', '', '')")
                .execute(&self.pool)
                .await?;
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM smtp_config")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO smtp_config (email, password) VALUES ('', '')")
                .execute(&self.pool)
                .await?;
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_credentials")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO admin_credentials (username, password) VALUES (?1, ?2)")
                .bind("admin")
                .bind("admin123")
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}
