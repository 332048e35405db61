pub mod booking;
pub mod repository;
pub mod settings;

pub use booking::{Booking, BookingDraft, FlightType, NewBooking, Passenger, PassengerType, ValidationError};
pub use repository::{BookingRepository, RepoError, SettingsRepository};
