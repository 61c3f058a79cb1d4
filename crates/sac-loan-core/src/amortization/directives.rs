//! Extra amortization directives.
//!
//! A directive describes when, and how much, principal is prepaid on top of
//! the regular SAC instalment. Directives arrive from the boundary as
//! [`DirectiveCandidate`]s (loosely typed, possibly malformed) and are turned
//! into validated [`ExtraAmortization`] values by [`validate_directives`] or
//! [`parse_directives`]. A bad directive is skipped with a reason; it never
//! aborts the batch.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScheduleError;
use crate::types::{Money, Months, Rate};
use crate::ScheduleResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Months = 12;

// ---------------------------------------------------------------------------
// Validated types
// ---------------------------------------------------------------------------

/// How often a recurring or growing directive fires, counted from its start
/// month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Monthly,
    Yearly,
    /// Every `n` months, `n >= 1`.
    Custom(Months),
}

impl Cadence {
    /// Length of one period in months.
    pub fn interval(self) -> Months {
        match self {
            Cadence::Monthly => 1,
            Cadence::Yearly => MONTHS_PER_YEAR,
            Cadence::Custom(n) => n,
        }
    }

    /// Whole periods elapsed since `start_month` if `month` is a trigger
    /// month, `None` otherwise.
    pub fn periods_elapsed(self, start_month: Months, month: Months) -> Option<u32> {
        if month < start_month {
            return None;
        }
        let interval = self.interval();
        if interval == 0 {
            return None;
        }
        let elapsed = month - start_month;
        (elapsed % interval == 0).then_some(elapsed / interval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    OneTime,
    Recurring,
    Growing,
}

impl DirectiveKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "one_time" => Some(DirectiveKind::OneTime),
            "recurring" => Some(DirectiveKind::Recurring),
            "growing" => Some(DirectiveKind::Growing),
            _ => None,
        }
    }
}

/// A validated extra amortization directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtraAmortization {
    /// A single prepayment in `month`.
    OneTime { amount: Money, month: Months },
    /// A fixed prepayment repeated on a cadence from `start_month`.
    Recurring {
        amount: Money,
        start_month: Months,
        cadence: Cadence,
    },
    /// A prepayment compounding by `growth_rate` per elapsed period.
    Growing {
        initial_amount: Money,
        growth_rate: Rate,
        start_month: Months,
        cadence: Cadence,
    },
}

impl ExtraAmortization {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            ExtraAmortization::OneTime { .. } => DirectiveKind::OneTime,
            ExtraAmortization::Recurring { .. } => DirectiveKind::Recurring,
            ExtraAmortization::Growing { .. } => DirectiveKind::Growing,
        }
    }

    /// Uncapped prepayment this directive asks for in `month`, or `None` when
    /// it does not fire.
    ///
    /// A growing amount too large to represent saturates at `Decimal::MAX`;
    /// callers cap it at the outstanding balance anyway.
    pub fn contribution(&self, month: Months) -> Option<Money> {
        match self {
            ExtraAmortization::OneTime { amount, month: due } => (month == *due).then_some(*amount),
            ExtraAmortization::Recurring {
                amount,
                start_month,
                cadence,
            } => cadence
                .periods_elapsed(*start_month, month)
                .map(|_| *amount),
            ExtraAmortization::Growing {
                initial_amount,
                growth_rate,
                start_month,
                cadence,
            } => cadence
                .periods_elapsed(*start_month, month)
                .map(|periods| grown_amount(*initial_amount, *growth_rate, periods)),
        }
    }

    /// Contribution in `month` capped at `balance`; zero when not firing.
    pub fn capped_contribution(&self, month: Months, balance: Money) -> Money {
        self.contribution(month)
            .map(|amount| amount.min(balance))
            .unwrap_or(Decimal::ZERO)
    }
}

fn grown_amount(initial_amount: Money, growth_rate: Rate, periods: u32) -> Money {
    (Decimal::ONE + growth_rate)
        .checked_powu(u64::from(periods))
        .and_then(|factor| initial_amount.checked_mul(factor))
        .unwrap_or(Decimal::MAX)
}

// ---------------------------------------------------------------------------
// Raw candidates
// ---------------------------------------------------------------------------

/// Frequency keyword as sent by the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Monthly,
    Yearly,
    Custom,
}

fn default_frequency_value() -> i64 {
    1
}

fn default_growth_rate() -> Rate {
    Decimal::ZERO
}

/// Unvalidated directive. Month fields are signed so that zero or negative
/// values reach the validator instead of failing deserialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectiveCandidate {
    OneTime {
        amount: Money,
        month: i64,
    },
    Recurring {
        amount: Money,
        start_month: i64,
        #[serde(default)]
        frequency: Frequency,
        #[serde(default = "default_frequency_value")]
        frequency_value: i64,
    },
    Growing {
        initial_amount: Money,
        #[serde(default = "default_growth_rate")]
        growth_rate: Rate,
        start_month: i64,
        #[serde(default)]
        frequency: Frequency,
        #[serde(default = "default_frequency_value")]
        frequency_value: i64,
    },
}

impl DirectiveCandidate {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            DirectiveCandidate::OneTime { .. } => DirectiveKind::OneTime,
            DirectiveCandidate::Recurring { .. } => DirectiveKind::Recurring,
            DirectiveCandidate::Growing { .. } => DirectiveKind::Growing,
        }
    }

    /// Check the candidate found at `index` in its batch.
    pub fn validate(&self, index: usize) -> ScheduleResult<ExtraAmortization> {
        match *self {
            DirectiveCandidate::OneTime { amount, month } => Ok(ExtraAmortization::OneTime {
                amount: positive_amount(index, "amount", amount)?,
                month: positive_month(index, "month", month)?,
            }),
            DirectiveCandidate::Recurring {
                amount,
                start_month,
                frequency,
                frequency_value,
            } => Ok(ExtraAmortization::Recurring {
                amount: positive_amount(index, "amount", amount)?,
                start_month: positive_month(index, "start_month", start_month)?,
                cadence: cadence(index, frequency, frequency_value)?,
            }),
            DirectiveCandidate::Growing {
                initial_amount,
                growth_rate,
                start_month,
                frequency,
                frequency_value,
            } => {
                let initial_amount = positive_amount(index, "initial_amount", initial_amount)?;
                if growth_rate < Decimal::NEGATIVE_ONE {
                    return Err(invalid(
                        index,
                        format!("growth_rate {growth_rate} is below -100%"),
                    ));
                }
                Ok(ExtraAmortization::Growing {
                    initial_amount,
                    growth_rate,
                    start_month: positive_month(index, "start_month", start_month)?,
                    cadence: cadence(index, frequency, frequency_value)?,
                })
            }
        }
    }
}

impl From<&ExtraAmortization> for DirectiveCandidate {
    fn from(directive: &ExtraAmortization) -> Self {
        fn split(cadence: Cadence) -> (Frequency, i64) {
            match cadence {
                Cadence::Monthly => (Frequency::Monthly, 1),
                Cadence::Yearly => (Frequency::Yearly, 1),
                Cadence::Custom(n) => (Frequency::Custom, i64::from(n)),
            }
        }

        match *directive {
            ExtraAmortization::OneTime { amount, month } => DirectiveCandidate::OneTime {
                amount,
                month: i64::from(month),
            },
            ExtraAmortization::Recurring {
                amount,
                start_month,
                cadence,
            } => {
                let (frequency, frequency_value) = split(cadence);
                DirectiveCandidate::Recurring {
                    amount,
                    start_month: i64::from(start_month),
                    frequency,
                    frequency_value,
                }
            }
            ExtraAmortization::Growing {
                initial_amount,
                growth_rate,
                start_month,
                cadence,
            } => {
                let (frequency, frequency_value) = split(cadence);
                DirectiveCandidate::Growing {
                    initial_amount,
                    growth_rate,
                    start_month: i64::from(start_month),
                    frequency,
                    frequency_value,
                }
            }
        }
    }
}

fn invalid(index: usize, reason: String) -> ScheduleError {
    ScheduleError::InvalidDirective { index, reason }
}

fn positive_amount(index: usize, field: &str, amount: Money) -> ScheduleResult<Money> {
    if amount <= Decimal::ZERO {
        return Err(invalid(index, format!("{field} must be positive, got {amount}")));
    }
    Ok(amount)
}

fn positive_month(index: usize, field: &str, month: i64) -> ScheduleResult<Months> {
    if month <= 0 {
        return Err(invalid(index, format!("{field} must be positive, got {month}")));
    }
    Months::try_from(month).map_err(|_| invalid(index, format!("{field} {month} is out of range")))
}

fn cadence(index: usize, frequency: Frequency, frequency_value: i64) -> ScheduleResult<Cadence> {
    match frequency {
        Frequency::Monthly => Ok(Cadence::Monthly),
        Frequency::Yearly => Ok(Cadence::Yearly),
        Frequency::Custom => {
            if frequency_value < 1 {
                return Err(invalid(
                    index,
                    format!("frequency_value must be at least 1, got {frequency_value}"),
                ));
            }
            Months::try_from(frequency_value)
                .map(Cadence::Custom)
                .map_err(|_| invalid(index, format!("frequency_value {frequency_value} is out of range")))
        }
    }
}

// ---------------------------------------------------------------------------
// Batch validation
// ---------------------------------------------------------------------------

/// A directive dropped from the batch, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDirective {
    /// Position in the submitted batch.
    pub index: usize,
    /// `None` when the record was too malformed to tell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DirectiveKind>,
    pub reason: String,
}

/// Result of validating a batch: directives to apply and directives dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectiveValidation {
    pub valid: Vec<ExtraAmortization>,
    pub skipped: Vec<SkippedDirective>,
}

impl DirectiveValidation {
    fn accept(&mut self, index: usize, candidate: &DirectiveCandidate) {
        match candidate.validate(index) {
            Ok(directive) => self.valid.push(directive),
            Err(e) => self.skipped.push(SkippedDirective {
                index,
                kind: Some(candidate.kind()),
                reason: match e {
                    ScheduleError::InvalidDirective { reason, .. } => reason,
                    other => other.to_string(),
                },
            }),
        }
    }

    /// One diagnostic line per skipped directive.
    pub fn warnings(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|s| match s.kind {
                Some(kind) => format!(
                    "Skipped extra amortization #{} ({}): {}",
                    s.index,
                    kind_label(kind),
                    s.reason
                ),
                None => format!("Skipped extra amortization #{}: {}", s.index, s.reason),
            })
            .collect()
    }
}

fn kind_label(kind: DirectiveKind) -> &'static str {
    match kind {
        DirectiveKind::OneTime => "one_time",
        DirectiveKind::Recurring => "recurring",
        DirectiveKind::Growing => "growing",
    }
}

/// Partition typed candidates into valid directives and skipped ones.
pub fn validate_directives(candidates: &[DirectiveCandidate]) -> DirectiveValidation {
    let mut validation = DirectiveValidation::default();
    for (index, candidate) in candidates.iter().enumerate() {
        validation.accept(index, candidate);
    }
    validation
}

/// Decode and validate loosely-typed directive records.
///
/// Records that cannot be decoded (unknown `type`, missing or non-numeric
/// fields) are skipped alongside the ones that decode but fail validation.
pub fn parse_directives(records: &[Value]) -> DirectiveValidation {
    let mut validation = DirectiveValidation::default();
    for (index, record) in records.iter().enumerate() {
        match DirectiveCandidate::deserialize(record) {
            Ok(candidate) => validation.accept(index, &candidate),
            Err(e) => validation.skipped.push(SkippedDirective {
                index,
                kind: record
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(DirectiveKind::from_tag),
                reason: format!("malformed directive: {e}"),
            }),
        }
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn recurring(amount: Money, start_month: Months, cadence: Cadence) -> ExtraAmortization {
        ExtraAmortization::Recurring {
            amount,
            start_month,
            cadence,
        }
    }

    fn growing(
        initial_amount: Money,
        growth_rate: Rate,
        start_month: Months,
        cadence: Cadence,
    ) -> ExtraAmortization {
        ExtraAmortization::Growing {
            initial_amount,
            growth_rate,
            start_month,
            cadence,
        }
    }

    fn firing_months(d: &ExtraAmortization, upto: Months) -> Vec<Months> {
        (1..=upto).filter(|m| d.contribution(*m).is_some()).collect()
    }

    // -----------------------------------------------------------------------
    // Trigger rules
    // -----------------------------------------------------------------------

    #[test]
    fn test_one_time_fires_only_in_its_month() {
        let d = ExtraAmortization::OneTime {
            amount: dec!(500),
            month: 4,
        };
        assert_eq!(firing_months(&d, 12), vec![4]);
        assert_eq!(d.contribution(4), Some(dec!(500)));
    }

    #[test]
    fn test_recurring_monthly_fires_from_start() {
        let d = recurring(dec!(100), 3, Cadence::Monthly);
        assert_eq!(firing_months(&d, 6), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_recurring_yearly_fires_every_twelve_months() {
        let d = recurring(dec!(100), 2, Cadence::Yearly);
        assert_eq!(firing_months(&d, 40), vec![2, 14, 26, 38]);
    }

    #[test]
    fn test_recurring_custom_fires_every_n_months() {
        let d = recurring(dec!(100), 5, Cadence::Custom(3));
        assert_eq!(firing_months(&d, 15), vec![5, 8, 11, 14]);
    }

    #[test]
    fn test_custom_interval_of_one_matches_monthly() {
        let custom = recurring(dec!(100), 2, Cadence::Custom(1));
        let monthly = recurring(dec!(100), 2, Cadence::Monthly);
        assert_eq!(firing_months(&custom, 24), firing_months(&monthly, 24));
    }

    // -----------------------------------------------------------------------
    // Growth compounding
    // -----------------------------------------------------------------------

    #[test]
    fn test_growing_monthly_compounds_each_month() {
        let d = growing(dec!(100), dec!(0.10), 1, Cadence::Monthly);
        assert_eq!(d.contribution(1), Some(dec!(100)));
        assert_eq!(d.contribution(2), Some(dec!(110)));
        assert_eq!(d.contribution(3), Some(dec!(121)));
    }

    #[test]
    fn test_growing_yearly_compounds_per_year() {
        let d = growing(dec!(1000), dec!(0.05), 1, Cadence::Yearly);
        assert_eq!(d.contribution(1), Some(dec!(1000)));
        assert_eq!(d.contribution(2), None);
        assert_eq!(d.contribution(13), Some(dec!(1050)));
        assert_eq!(d.contribution(25), Some(dec!(1102.5)));
    }

    #[test]
    fn test_growing_custom_compounds_per_interval() {
        let d = growing(dec!(200), dec!(0.5), 3, Cadence::Custom(4));
        assert_eq!(d.contribution(3), Some(dec!(200)));
        assert_eq!(d.contribution(7), Some(dec!(300)));
        assert_eq!(d.contribution(11), Some(dec!(450)));
        assert_eq!(d.contribution(9), None);
    }

    #[test]
    fn test_growing_with_zero_growth_equals_recurring() {
        for cadence in [Cadence::Monthly, Cadence::Yearly, Cadence::Custom(5)] {
            let g = growing(dec!(750), Decimal::ZERO, 2, cadence);
            let r = recurring(dec!(750), 2, cadence);
            for month in 1..=60 {
                assert_eq!(g.contribution(month), r.contribution(month), "{cadence:?} month {month}");
            }
        }
    }

    #[test]
    fn test_growing_negative_growth_decays() {
        let d = growing(dec!(1000), dec!(-0.5), 1, Cadence::Monthly);
        assert_eq!(d.contribution(2), Some(dec!(500)));
        assert_eq!(d.contribution(3), Some(dec!(250)));
    }

    #[test]
    fn test_growing_overflow_saturates_and_caps() {
        let d = growing(dec!(1_000_000), dec!(1000), 1, Cadence::Monthly);
        assert_eq!(d.contribution(40), Some(Decimal::MAX));
        assert_eq!(d.capped_contribution(40, dec!(1234.56)), dec!(1234.56));
    }

    #[test]
    fn test_capped_contribution_is_zero_when_not_firing() {
        let d = recurring(dec!(100), 6, Cadence::Monthly);
        assert_eq!(d.capped_contribution(5, dec!(1000)), Decimal::ZERO);
        assert_eq!(d.capped_contribution(6, dec!(40)), dec!(40));
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn test_validate_partitions_batch() {
        let candidates = vec![
            DirectiveCandidate::OneTime {
                amount: dec!(1000),
                month: 3,
            },
            DirectiveCandidate::OneTime {
                amount: dec!(0),
                month: 3,
            },
            DirectiveCandidate::Recurring {
                amount: dec!(100),
                start_month: 0,
                frequency: Frequency::Monthly,
                frequency_value: 1,
            },
            DirectiveCandidate::Growing {
                initial_amount: dec!(100),
                growth_rate: dec!(0.01),
                start_month: 2,
                frequency: Frequency::Custom,
                frequency_value: 0,
            },
            DirectiveCandidate::Growing {
                initial_amount: dec!(100),
                growth_rate: dec!(0.01),
                start_month: 2,
                frequency: Frequency::Custom,
                frequency_value: 6,
            },
        ];

        let v = validate_directives(&candidates);
        assert_eq!(v.valid.len(), 2);
        assert_eq!(
            v.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(v.skipped[0].reason, "amount must be positive, got 0");
        assert_eq!(v.skipped[1].reason, "start_month must be positive, got 0");
        assert_eq!(v.skipped[2].reason, "frequency_value must be at least 1, got 0");
        assert_eq!(
            v.valid[1],
            growing(dec!(100), dec!(0.01), 2, Cadence::Custom(6))
        );
    }

    #[test]
    fn test_frequency_value_ignored_unless_custom() {
        let candidate = DirectiveCandidate::Recurring {
            amount: dec!(100),
            start_month: 1,
            frequency: Frequency::Yearly,
            frequency_value: 0,
        };
        assert_eq!(
            candidate.validate(0).unwrap(),
            recurring(dec!(100), 1, Cadence::Yearly)
        );
    }

    #[test]
    fn test_growth_rate_below_minus_one_rejected() {
        let candidate = DirectiveCandidate::Growing {
            initial_amount: dec!(100),
            growth_rate: dec!(-1.5),
            start_month: 1,
            frequency: Frequency::Monthly,
            frequency_value: 1,
        };
        let err = candidate.validate(7).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDirective { index: 7, .. }));
    }

    #[test]
    fn test_candidate_roundtrip_from_validated() {
        let d = growing(dec!(10), dec!(0.2), 4, Cadence::Custom(3));
        let candidate = DirectiveCandidate::from(&d);
        assert_eq!(candidate.validate(0).unwrap(), d);
    }

    // -----------------------------------------------------------------------
    // Loose records
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_applies_field_defaults() {
        let records = vec![
            json!({ "type": "recurring", "amount": "250.00", "start_month": 2 }),
            json!({ "type": "growing", "initial_amount": 100, "start_month": 1 }),
        ];
        let v = parse_directives(&records);
        assert!(v.skipped.is_empty());
        assert_eq!(v.valid[0], recurring(dec!(250), 2, Cadence::Monthly));
        assert_eq!(v.valid[1], growing(dec!(100), Decimal::ZERO, 1, Cadence::Monthly));
    }

    #[test]
    fn test_parse_skips_malformed_records_without_aborting() {
        let records = vec![
            json!({ "type": "balloon", "amount": 10 }),
            json!({ "type": "one_time", "amount": "abc", "month": 1 }),
            json!({ "type": "one_time", "amount": 2000, "month": 1 }),
            json!({ "type": "recurring", "amount": 50, "start_month": -2 }),
            json!("not an object"),
        ];
        let v = parse_directives(&records);

        assert_eq!(
            v.valid,
            vec![ExtraAmortization::OneTime {
                amount: dec!(2000),
                month: 1
            }]
        );
        let skipped: Vec<(usize, Option<DirectiveKind>)> =
            v.skipped.iter().map(|s| (s.index, s.kind)).collect();
        assert_eq!(
            skipped,
            vec![
                (0, None),
                (1, Some(DirectiveKind::OneTime)),
                (3, Some(DirectiveKind::Recurring)),
                (4, None),
            ]
        );
        assert!(v.skipped[0].reason.starts_with("malformed directive"));
    }

    #[test]
    fn test_warnings_one_line_per_skip() {
        let records = vec![json!({ "type": "one_time", "amount": -5, "month": 2 })];
        let v = parse_directives(&records);
        assert_eq!(
            v.warnings(),
            vec!["Skipped extra amortization #0 (one_time): amount must be positive, got -5".to_string()]
        );
    }
}
