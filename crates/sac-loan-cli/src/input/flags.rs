//! Compact flag syntax for extra amortization directives.
//!
//! ```text
//! --one-time  AMOUNT@MONTH
//! --recurring AMOUNT@START[/CADENCE]
//! --growing   AMOUNT@START:GROWTH_PCT[/CADENCE]
//! CADENCE = monthly | yearly | every-N
//! ```
//!
//! Only the syntax is checked here. Out-of-range values (zero amounts,
//! non-positive months, `every-0`) are passed through for the core validator
//! to skip with a reason.

use sac_loan_core::amortization::{DirectiveCandidate, Frequency};

use super::locale::{parse_amount, parse_percent};

pub fn parse_one_time(raw: &str) -> Result<DirectiveCandidate, String> {
    let (amount, month) = split_at_sign(raw)?;
    Ok(DirectiveCandidate::OneTime {
        amount: parse_amount(amount)?,
        month: parse_month(month)?,
    })
}

pub fn parse_recurring(raw: &str) -> Result<DirectiveCandidate, String> {
    let (amount, rest) = split_at_sign(raw)?;
    let (start, cadence) = split_cadence(rest);
    let (frequency, frequency_value) = parse_cadence(cadence)?;
    Ok(DirectiveCandidate::Recurring {
        amount: parse_amount(amount)?,
        start_month: parse_month(start)?,
        frequency,
        frequency_value,
    })
}

pub fn parse_growing(raw: &str) -> Result<DirectiveCandidate, String> {
    let (amount, rest) = split_at_sign(raw)?;
    let (start_and_rate, cadence) = split_cadence(rest);
    let (start, rate) = start_and_rate
        .split_once(':')
        .ok_or_else(|| format!("expected AMOUNT@START:GROWTH_PCT, got '{raw}'"))?;
    let (frequency, frequency_value) = parse_cadence(cadence)?;
    Ok(DirectiveCandidate::Growing {
        initial_amount: parse_amount(amount)?,
        growth_rate: parse_percent(rate)?,
        start_month: parse_month(start)?,
        frequency,
        frequency_value,
    })
}

fn split_at_sign(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('@')
        .ok_or_else(|| format!("expected AMOUNT@MONTH, got '{raw}'"))
}

fn split_cadence(rest: &str) -> (&str, Option<&str>) {
    match rest.split_once('/') {
        Some((head, cadence)) => (head, Some(cadence)),
        None => (rest, None),
    }
}

fn parse_month(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid month '{raw}': {e}"))
}

fn parse_cadence(raw: Option<&str>) -> Result<(Frequency, i64), String> {
    let Some(raw) = raw else {
        return Ok((Frequency::Monthly, 1));
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "monthly" => Ok((Frequency::Monthly, 1)),
        "yearly" | "annual" => Ok((Frequency::Yearly, 1)),
        other => {
            let n = other
                .strip_prefix("every-")
                .ok_or_else(|| format!("unknown cadence '{raw}' (monthly, yearly or every-N)"))?;
            let n = n
                .parse::<i64>()
                .map_err(|e| format!("invalid cadence interval '{raw}': {e}"))?;
            Ok((Frequency::Custom, n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_time_flag() {
        assert_eq!(
            parse_one_time("2.000,00@1").unwrap(),
            DirectiveCandidate::OneTime {
                amount: dec!(2000),
                month: 1
            }
        );
    }

    #[test]
    fn test_recurring_flag_cadences() {
        assert_eq!(
            parse_recurring("500@3").unwrap(),
            DirectiveCandidate::Recurring {
                amount: dec!(500),
                start_month: 3,
                frequency: Frequency::Monthly,
                frequency_value: 1,
            }
        );
        assert_eq!(
            parse_recurring("500@3/every-4").unwrap(),
            DirectiveCandidate::Recurring {
                amount: dec!(500),
                start_month: 3,
                frequency: Frequency::Custom,
                frequency_value: 4,
            }
        );
        assert!(matches!(
            parse_recurring("500@3/Yearly").unwrap(),
            DirectiveCandidate::Recurring {
                frequency: Frequency::Yearly,
                ..
            }
        ));
    }

    #[test]
    fn test_growing_flag() {
        assert_eq!(
            parse_growing("1.000,00@12:5,5/yearly").unwrap(),
            DirectiveCandidate::Growing {
                initial_amount: dec!(1000),
                growth_rate: dec!(0.055),
                start_month: 12,
                frequency: Frequency::Yearly,
                frequency_value: 1,
            }
        );
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        assert_eq!(
            parse_recurring("0@-1/every-0").unwrap(),
            DirectiveCandidate::Recurring {
                amount: dec!(0),
                start_month: -1,
                frequency: Frequency::Custom,
                frequency_value: 0,
            }
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_one_time("2000").is_err());
        assert!(parse_growing("100@1").is_err());
        assert!(parse_recurring("100@1/fortnightly").is_err());
        assert!(parse_recurring("100@x").is_err());
    }
}
