use std::sync::Arc;

use sanve_domain::repository::{BookingRepository, SettingsRepository};
use sanve_notify::Notifier;
use sanve_store::app_config::SiteConfig;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub notifier: Arc<Notifier>,
    pub auth: AuthConfig,
    pub site: SiteConfig,
}
