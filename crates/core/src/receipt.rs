//! Receipt content for a booking. Layout and PDF rendering happen elsewhere.

use chrono::NaiveDate;

use crate::models::{
    booking::Booking,
    receipt::{BillTo, LineItem, Receipt, Totals, VenueDetails},
};

pub const LINE_ITEM_DESCRIPTION: &str = "Auditorium Booking (Event)";

/// `INV-` followed by the booking id padded to five digits.
pub fn invoice_number(booking_id: i64) -> String {
    format!("INV-{:05}", booking_id)
}

/// Formats an amount with two decimals and comma thousands separators,
/// e.g. `12345.5` becomes `"12,345.50"`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Assembles the receipt for `booking`, dated `issued_on`.
pub fn compose(booking: &Booking, venue: &VenueDetails, issued_on: NaiveDate) -> Receipt {
    let invoice_no = invoice_number(booking.id);

    Receipt {
        file_name: format!("{}_{}.pdf", venue.file_prefix, invoice_no),
        invoice_no,
        issued_on: issued_on.format("%d-%m-%Y").to_string(),
        venue: venue.clone(),
        bill_to: BillTo {
            name: booking.name.clone(),
            phone: booking.phone.clone(),
            email: booking.email.clone(),
        },
        line_item: LineItem {
            description: LINE_ITEM_DESCRIPTION.to_string(),
            from: format!("{} {}", booking.from_date, booking.from_time),
            to: format!("{} {}", booking.to_date, booking.to_time),
            amount: format_amount(booking.total_amount),
        },
        totals: Totals {
            total_amount: format_amount(booking.total_amount),
            advance_paid: format_amount(booking.advance),
            balance_due: format_amount(booking.balance),
        },
        closing_note: format!("Thank you for choosing {}.", venue.name),
    }
}
