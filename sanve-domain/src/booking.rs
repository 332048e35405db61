use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storefront clock: civil time at UTC+7, matching what the front end shows.
fn storefront_offset() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset")
}

/// Creation timestamp stored on every booking row.
pub fn creation_timestamp() -> String {
    Utc::now()
        .with_timezone(&storefront_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Human-readable reference printed in the confirmation email.
pub fn booking_reference(flight_id: &str) -> String {
    let stamp = Utc::now()
        .with_timezone(&storefront_offset())
        .format("%Y%m%d%H%M%S");
    format!("{}-{}", flight_id, stamp)
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Thiếu thông tin")]
    MissingField,
    #[error("Loại chuyến bay không hợp lệ")]
    InvalidFlightType,
    #[error("Thiếu ngày về cho chuyến bay khứ hồi")]
    MissingReturnDate,
    #[error("Thiếu thông tin hành khách")]
    MissingPassengerInfo,
    #[error("Loại hành khách không hợp lệ")]
    InvalidPassengerType,
    #[error("Phải có ít nhất một người lớn")]
    NoAdultPassenger,
    #[error("Số trẻ sơ sinh không được nhiều hơn số người lớn")]
    TooManyInfants,
    #[error("Thông tin liên hệ không hợp lệ")]
    InvalidContactInfo,
    #[error("Email không hợp lệ")]
    InvalidEmail,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

impl PassengerType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "adult" => Some(PassengerType::Adult),
            "child" => Some(PassengerType::Child),
            "infant" => Some(PassengerType::Infant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerType::Adult => "adult",
            PassengerType::Child => "child",
            PassengerType::Infant => "infant",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Passenger {
    #[serde(rename = "type")]
    pub kind: PassengerType,
    pub name: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum FlightType {
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "round-trip")]
    RoundTrip,
}

impl FlightType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "one-way" => Some(FlightType::OneWay),
            "round-trip" => Some(FlightType::RoundTrip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::OneWay => "one-way",
            FlightType::RoundTrip => "round-trip",
        }
    }
}

/// Raw submission payload. Every field deserializes as optional so a missing
/// key is classified by the validator instead of being rejected by serde.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub ip: Option<String>,
    pub flight_id: Option<String>,
    pub amount: Option<i64>,
    pub passengers: Option<Vec<PassengerInput>>,
    pub contact_info: Option<Value>,
    pub airline: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    #[serde(rename = "from")]
    pub origin: Option<String>,
    #[serde(rename = "to")]
    pub destination: Option<String>,
    pub date: Option<String>,
    pub flight_type: Option<String>,
    pub return_date: Option<String>,
    pub qr_code_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PassengerInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// A submission that passed validation, with every field normalized.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub ip: String,
    pub flight_id: String,
    pub amount: i64,
    pub passengers: Vec<Passenger>,
    pub contact_info: Value,
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub flight_type: FlightType,
    pub return_date: Option<String>,
    pub qr_code_url: Option<String>,
}

impl BookingDraft {
    /// Guaranteed present after validation.
    pub fn contact_email(&self) -> &str {
        self.contact_info
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Optional national-id lookup key; empty string when absent.
    pub fn id_lookup_key(&self) -> &str {
        self.contact_info
            .get("idNumber")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

impl NewBooking {
    /// Validates the submission against the storefront's booking rules, in
    /// order, short-circuiting on the first violation. Only guards against
    /// malformed input; richer semantic checks belong to the front end.
    pub fn validate(self) -> Result<BookingDraft, ValidationError> {
        let ip = self.ip.ok_or(ValidationError::MissingField)?;
        let flight_id = self.flight_id.ok_or(ValidationError::MissingField)?;
        let amount = self.amount.ok_or(ValidationError::MissingField)?;
        let passengers = self.passengers.ok_or(ValidationError::MissingField)?;
        let contact_info = self.contact_info.ok_or(ValidationError::MissingField)?;
        let airline = self.airline.ok_or(ValidationError::MissingField)?;
        let departure_time = self.departure_time.ok_or(ValidationError::MissingField)?;
        let arrival_time = self.arrival_time.ok_or(ValidationError::MissingField)?;
        let origin = self.origin.ok_or(ValidationError::MissingField)?;
        let destination = self.destination.ok_or(ValidationError::MissingField)?;
        let date = self.date.ok_or(ValidationError::MissingField)?;
        let flight_type_raw = self.flight_type.ok_or(ValidationError::MissingField)?;

        let flight_type =
            FlightType::parse(&flight_type_raw).ok_or(ValidationError::InvalidFlightType)?;

        if flight_type == FlightType::RoundTrip && self.return_date.is_none() {
            return Err(ValidationError::MissingReturnDate);
        }

        let mut adults = 0usize;
        let mut infants = 0usize;
        let mut normalized = Vec::with_capacity(passengers.len());
        for passenger in passengers {
            let (kind_raw, name) = match (passenger.kind, passenger.name) {
                (Some(kind), Some(name)) => (kind, name),
                _ => return Err(ValidationError::MissingPassengerInfo),
            };
            let kind =
                PassengerType::parse(&kind_raw).ok_or(ValidationError::InvalidPassengerType)?;
            match kind {
                PassengerType::Adult => adults += 1,
                PassengerType::Infant => infants += 1,
                PassengerType::Child => {}
            }
            normalized.push(Passenger { kind, name });
        }

        if adults == 0 {
            return Err(ValidationError::NoAdultPassenger);
        }
        if infants > adults {
            return Err(ValidationError::TooManyInfants);
        }

        let email = contact_info
            .as_object()
            .and_then(|c| c.get("email"))
            .ok_or(ValidationError::InvalidContactInfo)?;
        let email = email.as_str().ok_or(ValidationError::InvalidEmail)?;
        // Syntactic check only; the front end performs the richer validation.
        if !email.contains('@') || !email.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(BookingDraft {
            ip,
            flight_id,
            amount,
            passengers: normalized,
            contact_info,
            airline,
            departure_time,
            arrival_time,
            origin,
            destination,
            date,
            flight_type,
            return_date: self.return_date,
            qr_code_url: self.qr_code_url,
        })
    }
}

/// A persisted booking, with the embedded passenger and contact blobs
/// deserialized back into structured form.
#[derive(Debug, Serialize, Clone)]
pub struct Booking {
    pub id: i64,
    pub ip: String,
    #[serde(rename = "flightId")]
    pub flight_id: String,
    pub amount: i64,
    pub passengers: Value,
    #[serde(rename = "contactInfo")]
    pub contact_info: Value,
    pub airline: String,
    #[serde(rename = "departureTime")]
    pub departure_time: String,
    #[serde(rename = "arrivalTime")]
    pub arrival_time: String,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub date: String,
    #[serde(rename = "flightType")]
    pub flight_type: String,
    pub created_at: String,
    pub status: String,
}

impl Booking {
    /// Contact email as stored; empty string when the blob lacks one.
    pub fn contact_email(&self) -> &str {
        self.contact_info
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// National-id lookup key as stored; empty string when the blob lacks one.
    pub fn id_lookup_key(&self) -> &str {
        self.contact_info
            .get("idNumber")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> NewBooking {
        serde_json::from_value(json!({
            "ip": "203.0.113.7",
            "flightId": "VN123",
            "amount": 1_000_000,
            "passengers": [{"type": "adult", "name": "Nguyen Van A"}],
            "contactInfo": {"email": "a@b.com", "idNumber": "079123456789"},
            "airline": "Vietnam Airlines",
            "departureTime": "08:00",
            "arrivalTime": "10:05",
            "from": "SGN",
            "to": "HAN",
            "date": "2025-01-15",
            "flightType": "one-way"
        }))
        .expect("payload deserializes")
    }

    #[test]
    fn accepts_minimal_one_way_booking() {
        let draft = payload().validate().expect("valid booking");
        assert_eq!(draft.flight_type, FlightType::OneWay);
        assert_eq!(draft.passengers.len(), 1);
        assert_eq!(draft.contact_email(), "a@b.com");
        assert_eq!(draft.id_lookup_key(), "079123456789");
    }

    #[test]
    fn rejects_each_missing_required_field() {
        let required = [
            "ip",
            "flightId",
            "amount",
            "passengers",
            "contactInfo",
            "airline",
            "departureTime",
            "arrivalTime",
            "from",
            "to",
            "date",
            "flightType",
        ];
        for field in required {
            let mut raw = json!({
                "ip": "203.0.113.7",
                "flightId": "VN123",
                "amount": 1_000_000,
                "passengers": [{"type": "adult", "name": "A"}],
                "contactInfo": {"email": "a@b.com"},
                "airline": "VNA",
                "departureTime": "08:00",
                "arrivalTime": "10:05",
                "from": "SGN",
                "to": "HAN",
                "date": "2025-01-15",
                "flightType": "one-way"
            });
            raw.as_object_mut().expect("object").remove(field);
            let booking: NewBooking = serde_json::from_value(raw).expect("deserializes");
            assert_eq!(
                booking.validate().unwrap_err(),
                ValidationError::MissingField,
                "field {field} should be required"
            );
        }
    }

    #[test]
    fn rejects_unknown_flight_type() {
        let mut booking = payload();
        booking.flight_type = Some("multi-city".to_string());
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::InvalidFlightType
        );
    }

    #[test]
    fn round_trip_requires_return_date() {
        let mut booking = payload();
        booking.flight_type = Some("round-trip".to_string());
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::MissingReturnDate
        );

        let mut booking = payload();
        booking.flight_type = Some("round-trip".to_string());
        booking.return_date = Some("2025-01-20".to_string());
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn one_way_never_requires_return_date() {
        let mut booking = payload();
        booking.return_date = None;
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn rejects_passenger_without_name_or_type() {
        let mut booking = payload();
        booking.passengers = Some(vec![PassengerInput {
            kind: Some("adult".to_string()),
            name: None,
        }]);
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::MissingPassengerInfo
        );

        let mut booking = payload();
        booking.passengers = Some(vec![PassengerInput {
            kind: None,
            name: Some("A".to_string()),
        }]);
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::MissingPassengerInfo
        );
    }

    #[test]
    fn rejects_unknown_passenger_type() {
        let mut booking = payload();
        booking.passengers = Some(vec![PassengerInput {
            kind: Some("senior".to_string()),
            name: Some("A".to_string()),
        }]);
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::InvalidPassengerType
        );
    }

    #[test]
    fn requires_at_least_one_adult() {
        let mut booking = payload();
        booking.passengers = Some(vec![PassengerInput {
            kind: Some("child".to_string()),
            name: Some("B".to_string()),
        }]);
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::NoAdultPassenger
        );
    }

    #[test]
    fn caps_infants_at_adult_count() {
        let two_infants_one_adult = vec![
            PassengerInput {
                kind: Some("adult".to_string()),
                name: Some("A".to_string()),
            },
            PassengerInput {
                kind: Some("infant".to_string()),
                name: Some("B".to_string()),
            },
            PassengerInput {
                kind: Some("infant".to_string()),
                name: Some("C".to_string()),
            },
        ];
        let mut booking = payload();
        booking.passengers = Some(two_infants_one_adult);
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::TooManyInfants
        );

        // Equal counts are allowed.
        let mut booking = payload();
        booking.passengers = Some(vec![
            PassengerInput {
                kind: Some("adult".to_string()),
                name: Some("A".to_string()),
            },
            PassengerInput {
                kind: Some("infant".to_string()),
                name: Some("B".to_string()),
            },
        ]);
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn rejects_contact_info_without_email() {
        let mut booking = payload();
        booking.contact_info = Some(json!({"phone": "0900000000"}));
        assert_eq!(
            booking.validate().unwrap_err(),
            ValidationError::InvalidContactInfo
        );
    }

    #[test]
    fn rejects_syntactically_invalid_email() {
        for email in ["plainaddress", "missing-dot@host", "missing-at.host"] {
            let mut booking = payload();
            booking.contact_info = Some(json!({ "email": email }));
            assert_eq!(
                booking.validate().unwrap_err(),
                ValidationError::InvalidEmail,
                "email {email} should be rejected"
            );
        }
    }

    #[test]
    fn booking_reference_embeds_flight_id() {
        let reference = booking_reference("VN123");
        assert!(reference.starts_with("VN123-"));
        assert_eq!(reference.len(), "VN123-".len() + 14);
    }

    #[test]
    fn booking_serializes_with_wire_field_names() {
        let booking = Booking {
            id: 1,
            ip: "203.0.113.7".to_string(),
            flight_id: "VN123".to_string(),
            amount: 1_000_000,
            passengers: json!([{"type": "adult", "name": "A"}]),
            contact_info: json!({"email": "a@b.com"}),
            airline: "VNA".to_string(),
            departure_time: "08:00".to_string(),
            arrival_time: "10:05".to_string(),
            origin: "SGN".to_string(),
            destination: "HAN".to_string(),
            date: "2025-01-15".to_string(),
            flight_type: "one-way".to_string(),
            created_at: "2025-01-10 09:00:00".to_string(),
            status: "pending".to_string(),
        };
        let value = serde_json::to_value(&booking).expect("serializes");
        assert_eq!(value["flightId"], "VN123");
        assert_eq!(value["contactInfo"]["email"], "a@b.com");
        assert_eq!(value["from"], "SGN");
        assert_eq!(value["to"], "HAN");
        assert_eq!(value["flightType"], "one-way");
        assert_eq!(value["created_at"], "2025-01-10 09:00:00");
    }
}
