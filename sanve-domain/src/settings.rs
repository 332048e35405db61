use serde::{Deserialize, Serialize};

/// Pricing bounds and the front end's loading-time hint. Singleton row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub min_price: i64,
    pub max_price: i64,
    pub loading_time: i64,
}

/// Bank-transfer destination shown to customers. Singleton row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    pub bin: String,
    pub account_number: String,
    pub account_name: String,
}

/// SMTP account used for outbound mail. Singleton row, re-read before every
/// send so a rotation takes effect without a restart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub email: String,
    pub password: String,
}
