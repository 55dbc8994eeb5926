//! pt-BR formatting for amounts and dates, and parsing of typed amounts.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};

fn format_with_dots(value: u128) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `1234.5` becomes `1.234,50`. Negative values keep a leading `-`.
pub fn format_plain(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = (rounded.abs() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u128()
        .unwrap_or(0);
    format!("{}{},{:02}", sign, format_with_dots(cents / 100), cents % 100)
}

/// `format_plain` with the currency symbol, e.g. `R$ 1.234,50` or `-R$ 10,00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let plain = format_plain(amount);
    match plain.strip_prefix('-') {
        Some(rest) => format!("-{} {}", symbol, rest),
        None => format!("{} {}", symbol, plain),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Accepts `12,50`, `1.234,50`, `12.50` and plain integers.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().trim_start_matches("R$").trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn plain_format_groups_thousands_with_dots() {
        assert_eq!(format_plain(dec("0")), "0,00");
        assert_eq!(format_plain(dec("5.5")), "5,50");
        assert_eq!(format_plain(dec("1234.5")), "1.234,50");
        assert_eq!(format_plain(dec("1234567.891")), "1.234.567,89");
        assert_eq!(format_plain(dec("-40")), "-40,00");
    }

    #[test]
    fn currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(dec("60"), "R$"), "R$ 60,00");
        assert_eq!(format_currency(dec("-200"), "R$"), "-R$ 200,00");
    }

    #[test]
    fn dates_are_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "07/03/2024");
    }

    #[test]
    fn parse_amount_accepts_both_decimal_marks() {
        assert_eq!(parse_amount("12,50"), Some(dec("12.50")));
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("12.50"), Some(dec("12.50")));
        assert_eq!(parse_amount(" R$ 200 "), Some(dec("200")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
