use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use sanve_domain::booking::{Booking, BookingDraft};
use sanve_domain::repository::{BookingRepository, RepoError};

pub struct SqliteBookingRepository {
    pool: Pool<Sqlite>,
}

impl SqliteBookingRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    ip: String,
    flight_id: String,
    amount: i64,
    passengers: String,
    contact_info: String,
    airline: String,
    departure_time: String,
    arrival_time: String,
    origin: String,
    destination: String,
    date: String,
    flight_type: String,
    created_at: String,
    status: String,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, RepoError> {
        Ok(Booking {
            id: self.id,
            ip: self.ip,
            flight_id: self.flight_id,
            amount: self.amount,
            passengers: serde_json::from_str(&self.passengers)?,
            contact_info: serde_json::from_str(&self.contact_info)?,
            airline: self.airline,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            origin: self.origin,
            destination: self.destination,
            date: self.date,
            flight_type: self.flight_type,
            created_at: self.created_at,
            status: self.status,
        })
    }
}

const BOOKING_COLUMNS: &str = "id, ip, flight_id, amount, passengers, contact_info, airline, \
     departure_time, arrival_time, origin, destination, date, flight_type, created_at, status";

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn insert(&self, draft: &BookingDraft, created_at: &str) -> Result<i64, RepoError> {
        let passengers = serde_json::to_string(&draft.passengers)?;
        let contact_info = serde_json::to_string(&draft.contact_info)?;

        let result = sqlx::query(
            r#"
            INSERT INTO history_booking
                (ip, flight_id, amount, passengers, contact_info, airline,
                 departure_time, arrival_time, origin, destination, date,
                 flight_type, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&draft.ip)
        .bind(&draft.flight_id)
        .bind(draft.amount)
        .bind(passengers)
        .bind(contact_info)
        .bind(&draft.airline)
        .bind(&draft.departure_time)
        .bind(&draft.arrival_time)
        .bind(&draft.origin)
        .bind(&draft.destination)
        .bind(&draft.date)
        .bind(draft.flight_type.as_str())
        .bind("pending")
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_contact_fragment(&self, needle: &str) -> Result<Vec<Booking>, RepoError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM history_booking WHERE contact_info LIKE ?1"
        ))
        .bind(format!("%{needle}%"))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepoError> {
        let rows: Vec<BookingRow> =
            sqlx::query_as(&format!("SELECT {BOOKING_COLUMNS} FROM history_booking"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn fetch(&self, id: i64) -> Result<Option<Booking>, RepoError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM history_booking WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE history_booking SET status = ?1 WHERE id = ?2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM history_booking WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;
    use sanve_domain::booking::{FlightType, Passenger, PassengerType};
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> SqliteBookingRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        let db = DbClient { pool: pool.clone() };
        db.init_schema().await.expect("schema");
        SqliteBookingRepository::new(pool)
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            ip: "203.0.113.7".to_string(),
            flight_id: "VN123".to_string(),
            amount: 1_000_000,
            passengers: vec![Passenger {
                kind: PassengerType::Adult,
                name: "Nguyen Van A".to_string(),
            }],
            contact_info: json!({"email": "a@b.com", "idNumber": "079123456789"}),
            airline: "Vietnam Airlines".to_string(),
            departure_time: "08:00".to_string(),
            arrival_time: "10:05".to_string(),
            origin: "SGN".to_string(),
            destination: "HAN".to_string(),
            date: "2025-01-15".to_string(),
            flight_type: FlightType::OneWay,
            return_date: None,
            qr_code_url: None,
        }
    }

    #[tokio::test]
    async fn insert_stores_pending_booking() {
        let repo = repo().await;
        let id = repo
            .insert(&draft(), "2025-01-10 09:00:00")
            .await
            .expect("insert");

        let stored = repo.fetch(id).await.expect("fetch").expect("present");
        assert_eq!(stored.status, "pending");
        assert_eq!(stored.flight_id, "VN123");
        assert_eq!(stored.created_at, "2025-01-10 09:00:00");
        assert_eq!(stored.passengers[0]["type"], "adult");
        assert_eq!(stored.contact_info["email"], "a@b.com");
    }

    #[tokio::test]
    async fn contact_fragment_lookup_matches_any_substring() {
        let repo = repo().await;
        let id = repo
            .insert(&draft(), "2025-01-10 09:00:00")
            .await
            .expect("insert");

        // Full id number, a partial prefix, and a slice of the email all hit
        // the serialized blob.
        for needle in ["079123456789", "0791234", "a@b.com"] {
            let found = repo
                .find_by_contact_fragment(needle)
                .await
                .expect("lookup");
            assert_eq!(found.len(), 1, "needle {needle} should match");
            assert_eq!(found[0].id, id);
        }

        let found = repo
            .find_by_contact_fragment("000000")
            .await
            .expect("lookup");
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn list_all_returns_every_booking() {
        let repo = repo().await;
        repo.insert(&draft(), "2025-01-10 09:00:00")
            .await
            .expect("insert");
        repo.insert(&draft(), "2025-01-10 09:05:00")
            .await
            .expect("insert");

        let all = repo.list_all().await.expect("list");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn update_status_reports_missing_ids() {
        let repo = repo().await;
        let id = repo
            .insert(&draft(), "2025-01-10 09:00:00")
            .await
            .expect("insert");

        assert!(repo.update_status(id, "success").await.expect("update"));
        let stored = repo.fetch(id).await.expect("fetch").expect("present");
        assert_eq!(stored.status, "success");

        assert!(!repo.update_status(id + 100, "success").await.expect("update"));
    }

    #[tokio::test]
    async fn delete_removes_booking_from_both_lookup_paths() {
        let repo = repo().await;
        let id = repo
            .insert(&draft(), "2025-01-10 09:00:00")
            .await
            .expect("insert");

        assert!(repo.delete(id).await.expect("delete"));
        assert!(repo.fetch(id).await.expect("fetch").is_none());
        assert!(repo
            .find_by_contact_fragment("079123456789")
            .await
            .expect("lookup")
            .is_empty());
        assert!(repo.list_all().await.expect("list").is_empty());

        // Deleting an id that never existed is not an error.
        assert!(!repo.delete(id).await.expect("delete"));
    }
}
