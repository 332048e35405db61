use async_trait::async_trait;

use crate::booking::{Booking, BookingDraft};
use crate::settings::{BankInfo, PricingConfig, SmtpCredentials};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Persistence for booking records.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, draft: &BookingDraft, created_at: &str) -> Result<i64, RepoError>;

    /// Substring match against the serialized contact-info blob. Deliberately
    /// loose so partial national-id queries match; case sensitivity and
    /// false positives are accepted trade-offs of this lookup strategy.
    async fn find_by_contact_fragment(&self, needle: &str) -> Result<Vec<Booking>, RepoError>;

    async fn list_all(&self) -> Result<Vec<Booking>, RepoError>;

    async fn fetch(&self, id: i64) -> Result<Option<Booking>, RepoError>;

    /// Returns false when no row has the given id.
    async fn update_status(&self, id: i64, status: &str) -> Result<bool, RepoError>;

    /// Returns false when no row has the given id.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}

/// Singleton configuration rows plus the admin credential row.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn pricing(&self) -> Result<PricingConfig, RepoError>;
    async fn replace_pricing(&self, config: &PricingConfig) -> Result<(), RepoError>;

    async fn bank_info(&self) -> Result<BankInfo, RepoError>;
    async fn replace_bank_info(&self, info: &BankInfo) -> Result<(), RepoError>;

    async fn smtp_credentials(&self) -> Result<SmtpCredentials, RepoError>;
    async fn replace_smtp_credentials(&self, credentials: &SmtpCredentials)
        -> Result<(), RepoError>;

    /// Opaque comparison against the stored row; no hashing, matching the
    /// storefront it replaces. A known gap, not a pattern to copy.
    async fn verify_admin(&self, username: &str, password: &str) -> Result<bool, RepoError>;

    /// True when another account (not `other_than`) already owns `username`.
    async fn username_taken(&self, username: &str, other_than: &str) -> Result<bool, RepoError>;

    async fn replace_admin(
        &self,
        current_username: &str,
        new_username: &str,
        new_password: &str,
    ) -> Result<(), RepoError>;
}
