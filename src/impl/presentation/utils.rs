use chrono::NaiveDateTime;
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, USD = 2).
fn decimal_places(currency: Currency) -> usize {
    currency.exponent().unwrap_or(0) as usize
}

/// Absolute value rounded to `decimal_places`, with en-locale thousands
/// separators (1,234.50).
fn format_fixed(value: f64, decimal_places: usize) -> String {
    let scale = 10_i64.pow(decimal_places as u32);
    let minor_units = (value.abs() * scale as f64).round() as i64;
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::en);
    if decimal_places == 0 {
        integer_part
    } else {
        format!(
            "{}.{:0decimal_places$}",
            integer_part,
            minor_units % scale,
        )
    }
}

fn sign(value: f64, formatted: &str) -> &'static str {
    // Avoid "-$0.00" for values that round to zero.
    let is_zero = formatted.chars().all(|c| !c.is_ascii_digit() || c == '0');
    if value < 0.0 && !is_zero {
        "-"
    } else {
        ""
    }
}

/// Format cash amount with a leading currency symbol, the currency's number of
/// decimal places and thousands separators (ex. $4,250.00, ¥1,200).
///
/// Uses en locale regardless of currency, like the rest of the printed output.
pub(crate) fn format_money(amount: f64, currency: Currency) -> String {
    let digits = format_fixed(amount, decimal_places(currency));
    format!("{}{}{}", sign(amount, &digits), currency.symbol(), digits)
}

/// Quantities always print with two decimal places (ex. 1,234.50).
pub(crate) fn format_quantity(quantity: f64) -> String {
    let digits = format_fixed(quantity, 2);
    format!("{}{}", sign(quantity, &digits), digits)
}

/// Long-form invoice date (ex. January 15, 2024).
pub(crate) fn format_invoice_date(date: &NaiveDateTime) -> String {
    date.format("%B %d, %Y").to_string()
}

pub(crate) fn paid_label(paid: bool) -> &'static str {
    if paid {
        "PAID"
    } else {
        "UNPAID"
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn money_uses_symbol_separators_and_cents() {
        assert_eq!(format_money(4250.0, Currency::USD), "$4,250.00");
        assert_eq!(format_money(75.0, Currency::USD), "$75.00");
        assert_eq!(format_money(0.0, Currency::USD), "$0.00");
        assert_eq!(format_money(1234567.891, Currency::USD), "$1,234,567.89");
    }

    #[test]
    fn money_rounds_instead_of_truncating() {
        assert_eq!(format_money(0.999, Currency::USD), "$1.00");
        assert_eq!(format_money(19.995, Currency::USD), "$20.00");
    }

    #[test]
    fn money_negative_and_negative_zero() {
        assert_eq!(format_money(-12.5, Currency::USD), "-$12.50");
        assert_eq!(format_money(-0.001, Currency::USD), "$0.00");
    }

    #[test]
    fn money_respects_currency_exponent() {
        assert_eq!(format_money(1200.4, Currency::JPY), "¥1,200");
    }

    #[test]
    fn quantity_has_two_decimals() {
        assert_eq!(format_quantity(40.0), "40.00");
        assert_eq!(format_quantity(1234.5), "1,234.50");
    }

    #[test]
    fn invoice_date_is_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(format_invoice_date(&date), "January 15, 2024");
    }
}
