//! Formatting helpers for displaying money and dates the way an en-US browser would.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Format `number` as US dollars, e.g. `1234.5` becomes "$1,234.50".
///
/// Negative amounts keep the sign in front of the dollar sign ("-$12.30").
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("'$' is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("'-$' is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    // Round first so that values like 0.004 are treated as zero.
    let number = (number * 100.0).round() / 100.0;

    if number.abs() >= SCIENTIFIC_NOTATION_THRESHOLD {
        let sign = if number < 0.0 { "-" } else { "" };
        return format!("{sign}${}", group_thousands(number.abs()));
    }

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    pad_cents(formatted_string)
}

/// numfmt switches to (truncated) scientific notation from this magnitude up.
const SCIENTIFIC_NOTATION_THRESHOLD: f64 = 1e12;

/// Format a non-negative `number` with two decimals and comma separated
/// thousands, without any scaling.
fn group_thousands(number: f64) -> String {
    let plain = format!("{number:.2}");
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{grouped}.{cents}")
}

/// numfmt drops trailing zeros in the fractional part ("12.30" is rendered as
/// "12.3" and "12.00" as "12"), so pad the cents back to two digits.
fn pad_cents(formatted_string: String) -> String {
    match formatted_string.rsplit_once('.') {
        Some((whole, cents)) if cents.len() >= 2 => format!("{whole}.{}", &cents[..2]),
        Some((whole, cents)) => format!("{whole}.{cents:0<2}"),
        None => format!("{formatted_string}.00"),
    }
}

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Format an ISO 8601 date or date-time string as a US locale date, e.g.
/// "2025-03-07T10:15:00" becomes "3/7/2025".
///
/// Strings that do not start with a `YYYY-MM-DD` date are returned unchanged.
pub fn format_date(date_string: &str) -> String {
    match parse_date(date_string) {
        Some(date) => format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year()),
        None => date_string.to_owned(),
    }
}

/// Parse the `YYYY-MM-DD` date at the start of an ISO 8601 date or date-time string.
pub(crate) fn parse_date(date_string: &str) -> Option<Date> {
    let date_part = date_string.get(..10).unwrap_or(date_string);

    Date::parse(date_part, ISO_DATE_FORMAT)
        .inspect_err(|error| tracing::debug!("could not parse date {date_string:?}: {error}"))
        .ok()
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_thousands_with_two_decimals() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
    }

    #[test]
    fn formats_trillions_without_scientific_notation() {
        assert_eq!(format_currency(1e12), "$1,000,000,000,000.00");
        assert_eq!(format_currency(1_500_000_000_000.5), "$1,500,000,000,000.50");
    }

    #[test]
    fn formats_large_negative_amounts() {
        assert_eq!(format_currency(-2.5e15), "-$2,500,000,000,000,000.00");
    }

    #[test]
    fn formats_whole_numbers_with_cents() {
        assert_eq!(format_currency(100.0), "$100.00");
        assert_eq!(format_currency(12.3), "$12.30");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-42.75), "-$42.75");
    }
}
