//! Normalizes free-text currency input into the display form stored on categories.
//!
//! Amounts are stored as display strings such as `1 500 ₸`: the number with
//! thousands grouped by spaces, followed by the currency suffix.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

/// The currency symbol appended to every formatted amount.
pub const CURRENCY_SUFFIX: &str = "₸";

/// The display form used when the input contains no number.
pub const ZERO_AMOUNT: &str = "0 ₸";

/// The most fraction digits shown in a formatted amount.
const MAX_FRACTION_DIGITS: usize = 3;

/// Digits per thousands group.
const GROUP_SIZE: usize = 3;

/// Strip every character from `raw` except ASCII digits, `.` and `-`.
///
/// ```
/// use tenge_categories::parse_amount;
///
/// assert_eq!(parse_amount("1 500 ₸"), "1500");
/// ```
pub fn parse_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Format `raw` as a display amount, e.g. `"1500.50"` becomes `"1 500.5 ₸"`.
///
/// Everything except digits, `.` and `-` is discarded first. The longest
/// leading number of what is left is then grouped into thousands and shown
/// with at most three fraction digits. Input without a leading number, or
/// with a number too large for an `f64`, yields [ZERO_AMOUNT]. Negative
/// amounts are allowed.
pub fn format_amount(raw: &str) -> String {
    let numeric = parse_amount(raw);

    match parse_leading_number(&numeric).filter(|number| number.is_finite()) {
        Some(number) => format!("{} {CURRENCY_SUFFIX}", group_thousands(number)),
        None => ZERO_AMOUNT.to_owned(),
    }
}

/// Parse the longest prefix of `numeric` that reads as a decimal number.
///
/// The prefix may start with a single minus sign, must contain at least one
/// digit and stops at a second decimal point or a minus sign, so `"1.2.3"`
/// reads as `1.2` and `"12-3"` as `12`.
fn parse_leading_number(numeric: &str) -> Option<f64> {
    let bytes = numeric.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'-'));

    let mut seen_decimal_point = false;
    let mut end = None;

    for (i, byte) in bytes.iter().enumerate().skip(start) {
        match byte {
            b'0'..=b'9' => end = Some(i + 1),
            b'.' if !seen_decimal_point => seen_decimal_point = true,
            _ => break,
        }
    }

    end.and_then(|end| numeric[..end].parse::<f64>().ok())
}

fn group_thousands(number: f64) -> String {
    let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    let magnitude = number.abs();
    let mut whole = magnitude.trunc();
    // Scaling only the fraction keeps huge numbers from overflowing.
    let mut fraction = ((magnitude - whole) * scale).round() as u64;
    if fraction as f64 >= scale {
        whole += 1.0;
        fraction = 0;
    }

    // `{:.0}` prints every digit of the integer, never an exponent.
    let digits = format!("{whole:.0}");
    let mut formatted = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE + 8);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % GROUP_SIZE == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }

    if fraction > 0 {
        let fraction_digits = format!("{fraction:0width$}", width = MAX_FRACTION_DIGITS);
        formatted.push('.');
        formatted.push_str(fraction_digits.trim_end_matches('0'));
    }

    if number < 0.0 && (whole > 0.0 || fraction > 0) {
        formatted.insert(0, '-');
    }

    formatted
}

/// The query string for the amount preview endpoint.
#[derive(Debug, Deserialize)]
pub struct AmountPreviewQuery {
    #[serde(default)]
    pub amount: String,
}

/// Render the preview of how an amount will be saved.
///
/// The edit form requests this as the user types in the amount field.
pub async fn get_amount_preview(Query(query): Query<AmountPreviewQuery>) -> Response {
    amount_preview_view(&query.amount).into_response()
}

/// The `#amount-preview` paragraph shown under the amount field.
pub fn amount_preview_view(raw_amount: &str) -> Markup {
    html! {
        p id="amount-preview" class="mt-1 text-sm text-gray-500 dark:text-gray-400"
        {
            "Will be saved as: " (format_amount(raw_amount))
        }
    }
}

#[cfg(test)]
mod parse_amount_tests {
    use super::parse_amount;

    #[test]
    fn keeps_digits_decimal_point_and_minus() {
        assert_eq!(parse_amount("-1 234.50 ₸"), "-1234.50");
    }

    #[test]
    fn strips_letters_and_symbols() {
        assert_eq!(parse_amount("abc$%^&*()"), "");
    }
}

#[cfg(test)]
mod format_amount_tests {
    use super::{ZERO_AMOUNT, format_amount, parse_amount};

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(format_amount(""), ZERO_AMOUNT);
    }

    #[test]
    fn input_without_digits_is_zero() {
        for input in ["abc", "₸", "   ", "hello world", "-", ".", "-.", "--"] {
            assert_eq!(format_amount(input), ZERO_AMOUNT, "input {input:?}");
        }
    }

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(format_amount("1234"), "1 234 ₸");
        assert_eq!(format_amount("1500000"), "1 500 000 ₸");
    }

    #[test]
    fn small_numbers_are_not_grouped() {
        assert_eq!(format_amount("999"), "999 ₸");
        assert_eq!(format_amount("0"), "0 ₸");
    }

    #[test]
    fn keeps_up_to_three_fraction_digits() {
        assert_eq!(format_amount("12.5"), "12.5 ₸");
        assert_eq!(format_amount("0.125"), "0.125 ₸");
        assert_eq!(format_amount("1.23456"), "1.235 ₸");
        assert_eq!(format_amount("7.000"), "7 ₸");
    }

    #[test]
    fn negative_amounts_pass_through() {
        assert_eq!(format_amount("-2500"), "-2 500 ₸");
    }

    #[test]
    fn ignores_text_around_the_number() {
        assert_eq!(format_amount("about 1 500 tenge"), "1 500 ₸");
    }

    #[test]
    fn reads_only_the_leading_number() {
        assert_eq!(format_amount("1.2.3"), "1.2 ₸");
        assert_eq!(format_amount("12-3"), "12 ₸");
    }

    #[test]
    fn groups_every_digit_of_large_amounts() {
        assert_eq!(format_amount("123456789012"), "123 456 789 012 ₸");
        assert_eq!(format_amount("1234567890123"), "1 234 567 890 123 ₸");
        assert_eq!(format_amount("123456789012345"), "123 456 789 012 345 ₸");
        assert_eq!(format_amount("-1234567890123"), "-1 234 567 890 123 ₸");
        assert_eq!(format_amount("-123456789012345"), "-123 456 789 012 345 ₸");
    }

    #[test]
    fn large_amounts_have_no_exponent() {
        let formatted = format_amount(&"9".repeat(300));
        let number = formatted.trim_end_matches(" ₸");

        assert!(
            number.chars().all(|c| c.is_ascii_digit() || c == ' '),
            "got {formatted:?}"
        );
        assert!(number.split(' ').skip(1).all(|group| group.len() == 3));
    }

    #[test]
    fn rounding_carries_into_whole_part() {
        assert_eq!(format_amount("7.9996"), "8 ₸");
        assert_eq!(format_amount("999.9999"), "1 000 ₸");
    }

    #[test]
    fn overflowing_input_is_zero() {
        assert_eq!(format_amount(&"9".repeat(400)), ZERO_AMOUNT);
    }

    #[test]
    fn formatting_is_idempotent() {
        let long_digits = "9".repeat(300);
        let overflowing_digits = "9".repeat(400);
        let inputs = [
            "0",
            "5",
            "1234",
            "1500000",
            "-2500",
            "12.5",
            "1234.567",
            "0.5",
            "1234567890123",
            "-1234567890123",
            "123456789012345",
            "-123456789012345",
            "123456789012345678901",
            long_digits.as_str(),
            overflowing_digits.as_str(),
        ];

        for input in inputs {
            let once = format_amount(input);
            let twice = format_amount(&parse_amount(&once));

            assert_eq!(once, twice, "input {input:?}");
        }
    }
}
