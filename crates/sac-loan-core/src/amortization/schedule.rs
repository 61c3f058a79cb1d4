//! SAC schedule generation.
//!
//! The regular principal instalment is `principal / term_months`, fixed for
//! the life of the loan. Interest accrues monthly on the outstanding
//! balance, extra amortization directives prepay principal, and the balance
//! is rounded to cents every month, so rounding carries from one month to
//! the next.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::directives::ExtraAmortization;
use crate::error::ScheduleError;
use crate::types::{round_money, Money, Months, Rate};
use crate::ScheduleResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Loan terms, already parsed into native values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Annual nominal rate as a fraction; the monthly rate is a twelfth of it.
    pub annual_interest_rate: Rate,
    /// Fixed insurance charge added to every instalment.
    #[serde(default)]
    pub monthly_insurance: Money,
    /// Fixed administration fee added to every instalment.
    #[serde(default)]
    pub monthly_operational_fee: Money,
    /// Signed so that a negative term reaches `validate` instead of failing
    /// deserialization without naming the field.
    pub term_months: i64,
}

impl LoanParameters {
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(ScheduleError::InvalidPrincipal(self.principal));
        }
        self.term()?;
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(ScheduleError::InvalidInterestRate(self.annual_interest_rate));
        }
        if self.monthly_insurance < Decimal::ZERO {
            return Err(ScheduleError::InvalidInput {
                field: "monthly_insurance".into(),
                reason: "Insurance cannot be negative".into(),
            });
        }
        if self.monthly_operational_fee < Decimal::ZERO {
            return Err(ScheduleError::InvalidInput {
                field: "monthly_operational_fee".into(),
                reason: "Operational fee cannot be negative".into(),
            });
        }
        Ok(())
    }

    /// Term as a month count. Fails when it is not positive or does not fit
    /// in [`Months`].
    pub fn term(&self) -> ScheduleResult<Months> {
        match Months::try_from(self.term_months) {
            Ok(term) if term > 0 => Ok(term),
            _ => Err(ScheduleError::InvalidTerm(self.term_months)),
        }
    }

    pub fn monthly_interest_rate(&self) -> Rate {
        self.annual_interest_rate / MONTHS_PER_YEAR
    }

    /// Constant principal instalment. Requires a validated, non-zero term.
    pub fn regular_amortization(&self) -> Money {
        self.principal / Decimal::from(self.term_months)
    }
}

/// One month of the schedule. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    pub month: Months,
    /// Interest + amortization + insurance + operational fee.
    pub payment: Money,
    pub interest: Money,
    /// Total principal repaid this month.
    pub amortization: Money,
    pub regular_amortization: Money,
    /// Sum of the directive contributions, each capped at the balance.
    pub extra_amortization: Money,
    pub insurance: Money,
    pub operational_fee: Money,
    /// Balance after this month's amortization.
    pub remaining_balance: Money,
}

/// Generate the month-by-month SAC schedule.
///
/// Runs until the balance reaches zero or `term_months` instalments have
/// been produced, whichever comes first. Directive order does not matter.
pub fn generate_schedule(
    params: &LoanParameters,
    directives: &[ExtraAmortization],
) -> ScheduleResult<Vec<MonthlyPayment>> {
    params.validate()?;
    let term = params.term()?;

    let monthly_rate = params.monthly_interest_rate();
    let regular = params.regular_amortization();

    // Grows with the months actually paid; the nominal term can be far longer.
    let mut schedule: Vec<MonthlyPayment> = Vec::new();
    let mut balance = params.principal;

    for month in 1..=term {
        if balance <= Decimal::ZERO {
            break;
        }

        let interest = balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| out_of_range("principal", "interest", month))?;
        let regular_amortization = regular.min(balance);

        // Each contribution is capped on its own; the total is capped again below.
        let extra_amortization = directives
            .iter()
            .try_fold(Decimal::ZERO, |acc, d| {
                acc.checked_add(d.capped_contribution(month, balance))
            })
            .ok_or_else(|| out_of_range("extra_amortizations", "extra amortization", month))?;

        // An overflowing sum is above the balance, so the cap applies.
        let amortization = regular
            .checked_add(extra_amortization)
            .map_or(balance, |total| total.min(balance));
        let payment = interest
            .checked_add(amortization)
            .and_then(|p| p.checked_add(params.monthly_insurance))
            .and_then(|p| p.checked_add(params.monthly_operational_fee))
            .ok_or_else(|| out_of_range("principal", "payment", month))?;

        balance = round_money(balance - amortization);

        schedule.push(MonthlyPayment {
            month,
            payment: round_money(payment),
            interest: round_money(interest),
            amortization: round_money(amortization),
            regular_amortization: round_money(regular_amortization),
            extra_amortization: round_money(extra_amortization),
            insurance: round_money(params.monthly_insurance),
            operational_fee: round_money(params.monthly_operational_fee),
            remaining_balance: balance,
        });
    }

    Ok(schedule)
}

fn out_of_range(field: &str, what: &str, month: Months) -> ScheduleError {
    ScheduleError::InvalidInput {
        field: field.into(),
        reason: format!("month {month} {what} exceeds the representable decimal range"),
    }
}
