use sanve_domain::booking::Passenger;

/// Amount with dot thousands separators, the way the storefront prints VND.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if amount < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Content of the "booking received" confirmation mail.
#[derive(Debug, Clone)]
pub struct ConfirmationEmail {
    pub to: String,
    pub booking_reference: String,
    pub airline: String,
    pub flight_type: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub return_date: Option<String>,
    pub passengers: Vec<Passenger>,
    pub amount: i64,
    pub qr_code_url: String,
}

/// Content of the "payment confirmed" success mail.
#[derive(Debug, Clone)]
pub struct SuccessEmail {
    pub to: String,
    pub booking_reference: String,
    pub search_url: String,
}

pub const CONFIRMATION_SUBJECT: &str = "Xác nhận đặt vé";
pub const SUCCESS_SUBJECT: &str = "Đặt vé thành công";

pub fn render_confirmation(email: &ConfirmationEmail) -> String {
    let passengers = email
        .passengers
        .iter()
        .map(|Passenger { kind, name }| {
            format!(
                "<li>{} ({})</li>",
                html_escape(name),
                kind.as_str()
            )
        })
        .collect::<String>();

    let return_row = match &email.return_date {
        Some(return_date) => format!(
            "<p>Ngày về: <strong>{}</strong></p>",
            html_escape(return_date)
        ),
        None => String::new(),
    };

    let qr_block = if email.qr_code_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p>Quét mã QR để thanh toán:</p><img src="{}" alt="QR" width="240">"#,
            html_escape(&email.qr_code_url)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #2563eb;">Xác nhận đặt vé</h2>
    <p>Mã đặt chỗ: <strong>{reference}</strong></p>
    <p>Hãng bay: <strong>{airline}</strong> ({flight_type})</p>
    <p>Hành trình: <strong>{origin} &rarr; {destination}</strong></p>
    <p>Ngày bay: <strong>{date}</strong>, khởi hành {departure} &ndash; đến {arrival}</p>
    {return_row}
    <p>Hành khách:</p>
    <ul>{passengers}</ul>
    <p>Tổng tiền: <strong>{amount} VND</strong></p>
    <p>Vui lòng chuyển khoản để hoàn tất đặt vé.</p>
    {qr_block}
  </div>
</body>
</html>"#,
        reference = html_escape(&email.booking_reference),
        airline = html_escape(&email.airline),
        flight_type = html_escape(&email.flight_type),
        origin = html_escape(&email.origin),
        destination = html_escape(&email.destination),
        date = html_escape(&email.date),
        departure = html_escape(&email.departure_time),
        arrival = html_escape(&email.arrival_time),
        return_row = return_row,
        passengers = passengers,
        amount = format_amount(email.amount),
        qr_block = qr_block,
    )
}

pub fn render_success(email: &SuccessEmail) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #16a34a;">Đặt vé thành công</h2>
    <p>Mã đặt chỗ: <strong>{reference}</strong></p>
    <p>Thanh toán của bạn đã được xác nhận.</p>
    <p><a href="{search_url}">Tra cứu lịch sử đặt vé</a></p>
  </div>
</body>
</html>"#,
        reference = html_escape(&email.booking_reference),
        search_url = html_escape(&email.search_url),
    )
}

fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanve_domain::booking::PassengerType;

    #[test]
    fn amount_formatting_uses_dot_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(950), "950");
        assert_eq!(format_amount(1_000), "1.000");
        assert_eq!(format_amount(1_000_000), "1.000.000");
        assert_eq!(format_amount(123_456_789), "123.456.789");
        assert_eq!(format_amount(-1_500_000), "-1.500.000");
    }

    fn confirmation() -> ConfirmationEmail {
        ConfirmationEmail {
            to: "a@b.com".to_string(),
            booking_reference: "VN123-20250110090000".to_string(),
            airline: "Vietnam Airlines".to_string(),
            flight_type: "round-trip".to_string(),
            origin: "SGN".to_string(),
            destination: "HAN".to_string(),
            date: "2025-01-15".to_string(),
            departure_time: "08:00".to_string(),
            arrival_time: "10:05".to_string(),
            return_date: Some("2025-01-20".to_string()),
            passengers: vec![Passenger {
                kind: PassengerType::Adult,
                name: "Nguyen Van A".to_string(),
            }],
            amount: 1_000_000,
            qr_code_url: "https://img.vietqr.io/image/abc.png".to_string(),
        }
    }

    #[test]
    fn confirmation_includes_reference_passengers_and_amount() {
        let html = render_confirmation(&confirmation());
        assert!(html.contains("VN123-20250110090000"));
        assert!(html.contains("Nguyen Van A"));
        assert!(html.contains("adult"));
        assert!(html.contains("1.000.000 VND"));
        assert!(html.contains("Ngày về"));
        assert!(html.contains("img.vietqr.io"));
    }

    #[test]
    fn confirmation_omits_optional_blocks() {
        let mut email = confirmation();
        email.return_date = None;
        email.qr_code_url = String::new();
        let html = render_confirmation(&email);
        assert!(!html.contains("Ngày về"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn success_links_the_lookup_url() {
        let html = render_success(&SuccessEmail {
            to: "a@b.com".to_string(),
            booking_reference: "VN123".to_string(),
            search_url: "https://giapzech.tech/tra-cuu-lich-su-dat-ve?tim_kiem=079123456789"
                .to_string(),
        });
        assert!(html.contains("tim_kiem=079123456789"));
        assert!(html.contains("VN123"));
    }
}
