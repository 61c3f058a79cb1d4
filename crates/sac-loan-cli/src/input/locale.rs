//! Brazilian-style numeric input (`.` groups thousands, `,` marks decimals).
//!
//! Used as clap value parsers, so every function returns `Result<_, String>`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Parse a currency amount such as `250.000,00`, `1.500`, `R$ 99,90` or
/// `1234.56`.
///
/// Without a comma, a single dot followed by exactly three digits is read as
/// a thousands separator (`1.500` is fifteen hundred).
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(format!("empty amount '{raw}'"));
    }

    let normalised = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        match cleaned.matches('.').count() {
            0 => cleaned,
            1 => match cleaned.rsplit_once('.') {
                Some((_, frac)) if frac.len() == 3 => cleaned.replace('.', ""),
                _ => cleaned,
            },
            _ => cleaned.replace('.', ""),
        }
    };

    Decimal::from_str(&normalised).map_err(|e| format!("invalid amount '{raw}': {e}"))
}

/// Parse a percentage such as `12`, `10,5` or `7.25%` into a fraction.
pub fn parse_percent(raw: &str) -> Result<Decimal, String> {
    let value = decimal_comma(raw.trim().trim_end_matches('%'))
        .map_err(|e| format!("invalid percentage '{raw}': {e}"))?;
    Ok(value / dec!(100))
}

/// Parse a rate already expressed as a fraction, accepting `0,12` as well as
/// `0.12`.
pub fn parse_rate(raw: &str) -> Result<Decimal, String> {
    decimal_comma(raw).map_err(|e| format!("invalid rate '{raw}': {e}"))
}

fn decimal_comma(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = raw.trim();
    if trimmed.contains(',') {
        Decimal::from_str(&trimmed.replace('.', "").replace(',', "."))
    } else {
        Decimal::from_str(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brazilian_amounts() {
        assert_eq!(parse_amount("250.000,00").unwrap(), dec!(250000));
        assert_eq!(parse_amount("1.234.567,89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_amount("R$ 99,90").unwrap(), dec!(99.90));
        assert_eq!(parse_amount("1.500").unwrap(), dec!(1500));
        assert_eq!(parse_amount("2.000.000").unwrap(), dec!(2000000));
    }

    #[test]
    fn test_plain_amounts() {
        assert_eq!(parse_amount("1234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("12000").unwrap(), dec!(12000));
        assert_eq!(parse_amount("-50").unwrap(), dec!(-50));
    }

    #[test]
    fn test_bad_amounts() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("R$").is_err());
        assert!(parse_amount("12a").is_err());
    }

    #[test]
    fn test_percentages() {
        assert_eq!(parse_percent("12").unwrap(), dec!(0.12));
        assert_eq!(parse_percent("10,5").unwrap(), dec!(0.105));
        assert_eq!(parse_percent("7.25%").unwrap(), dec!(0.0725));
        assert!(parse_percent("abc").is_err());
    }

    #[test]
    fn test_rates() {
        assert_eq!(parse_rate("0,12").unwrap(), dec!(0.12));
        assert_eq!(parse_rate("0.0075").unwrap(), dec!(0.0075));
    }
}
