//! Income and expense normalization
//!
//! Converts any amount + frequency pair into a canonical monthly figure.
//! All conversion happens as integer rational arithmetic on cents with a
//! single rounding at the end, so the monthly figure is a pure function of
//! the record's raw fields and can be recomputed bit-for-bit at any time.

use std::collections::BTreeMap;

use crate::error::{EligibilityError, EligibilityResult};
use crate::models::income::IncomeValidationError;
use crate::models::{
    Expense, ExpenseFrequency, ExpenseType, IncomeFrequency, IncomeSource, Money,
};

/// An income source reduced to its monthly contribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIncome {
    pub source_name: String,
    pub monthly_amount: Money,
    /// Whether the source counts as earned for the earned-income deduction
    pub earned: bool,
}

/// An expense reduced to its monthly cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExpense {
    pub expense_type: ExpenseType,
    pub monthly_amount: Money,
}

/// Convert an income source to its monthly amount
///
/// Fails with `InvalidInput` for malformed records (hourly income without
/// positive hours) and `InsufficientData` for irregular income with no
/// recorded months. Zero is never silently substituted.
pub fn monthly_income(source: &IncomeSource) -> EligibilityResult<Money> {
    source.validate().map_err(|e| match e {
        IncomeValidationError::NegativeAmount => {
            EligibilityError::invalid_input("amount", e.to_string())
        }
        IncomeValidationError::NegativeBusinessExpenses => {
            EligibilityError::invalid_input("business_expenses", e.to_string())
        }
        IncomeValidationError::MissingHours => {
            EligibilityError::invalid_input("hours_per_week", e.to_string())
        }
        IncomeValidationError::NoIrregularMonths => {
            EligibilityError::insufficient_data("irregular_months", e.to_string())
        }
    })?;

    if source.uses_irregular_average() {
        return irregular_monthly_average(source);
    }

    // Business expenses come off the per-period amount before the frequency
    // multiplier, floored at zero: income is never negative.
    let per_period = (source.amount - source.business_expenses).positive_or_zero();

    let monthly = match source.frequency {
        IncomeFrequency::Hourly => {
            // validate() guarantees hours is present, finite and positive;
            // tenths of an hour are honored exactly.
            let hours = source.hours_per_week.unwrap_or_default();
            let hour_tenths = (hours * 10.0).round() as i64;
            per_period.mul_rational(hour_tenths * 52, 10 * 12)
        }
        IncomeFrequency::Weekly => per_period.mul_rational(52, 12),
        IncomeFrequency::Biweekly => per_period.mul_rational(26, 12),
        IncomeFrequency::SemiMonthly => per_period.mul_rational(2, 1),
        IncomeFrequency::Monthly => per_period,
        IncomeFrequency::Annual => per_period.mul_rational(1, 12),
        // validate() + uses_irregular_average() route this away above
        IncomeFrequency::Irregular => unreachable!("irregular handled above"),
    };

    Ok(monthly)
}

/// Average irregular income over the distinct months recorded
///
/// Duplicate entries for the same month are summed into that month before
/// averaging.
fn irregular_monthly_average(source: &IncomeSource) -> EligibilityResult<Money> {
    let mut by_month: BTreeMap<&str, Money> = BTreeMap::new();
    for entry in &source.irregular_months {
        let slot = by_month.entry(entry.month.as_str()).or_default();
        *slot += entry.amount;
    }

    let total: Money = by_month.values().copied().sum();
    let average = total.mul_rational(1, by_month.len() as i64);

    Ok((average - source.business_expenses).positive_or_zero())
}

/// Convert an expense to its monthly amount
pub fn monthly_expense(expense: &Expense) -> EligibilityResult<Money> {
    expense
        .validate()
        .map_err(|e| EligibilityError::invalid_input("amount", e.to_string()))?;

    let monthly = match expense.frequency {
        ExpenseFrequency::Weekly => expense.amount.mul_rational(52, 12),
        ExpenseFrequency::Biweekly => expense.amount.mul_rational(26, 12),
        ExpenseFrequency::SemiMonthly => expense.amount.mul_rational(2, 1),
        ExpenseFrequency::Monthly => expense.amount,
        ExpenseFrequency::Quarterly => expense.amount.mul_rational(4, 12),
        ExpenseFrequency::Annual => expense.amount.mul_rational(1, 12),
    };

    Ok(monthly)
}

/// Normalize a batch of income sources, preserving input order
pub fn normalize_incomes(sources: &[IncomeSource]) -> EligibilityResult<Vec<NormalizedIncome>> {
    sources
        .iter()
        .map(|source| {
            Ok(NormalizedIncome {
                source_name: source.source_name.clone(),
                monthly_amount: monthly_income(source)?,
                earned: source.income_type.is_earned(),
            })
        })
        .collect()
}

/// Normalize a batch of expenses, preserving input order
pub fn normalize_expenses(expenses: &[Expense]) -> EligibilityResult<Vec<NormalizedExpense>> {
    expenses
        .iter()
        .map(|expense| {
            Ok(NormalizedExpense {
                expense_type: expense.expense_type,
                monthly_amount: monthly_expense(expense)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeType, IrregularMonth};

    fn source(amount: Money, frequency: IncomeFrequency) -> IncomeSource {
        IncomeSource::new(IncomeType::W2Employment, "Job", amount, frequency)
    }

    #[test]
    fn test_monthly_identity() {
        let s = source(Money::from_dollars(2000), IncomeFrequency::Monthly);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(2000));
    }

    #[test]
    fn test_weekly_conversion() {
        // $1000/week * 52 / 12 = $4333.33
        let s = source(Money::from_dollars(1000), IncomeFrequency::Weekly);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_cents(433_333));
    }

    #[test]
    fn test_biweekly_conversion() {
        // $1200 biweekly * 26 / 12 = $2600.00
        let s = source(Money::from_dollars(1200), IncomeFrequency::Biweekly);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(2600));
    }

    #[test]
    fn test_semi_monthly_conversion() {
        let s = source(Money::from_dollars(900), IncomeFrequency::SemiMonthly);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(1800));
    }

    #[test]
    fn test_annual_conversion() {
        let s = source(Money::from_dollars(36_000), IncomeFrequency::Annual);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(3000));
    }

    #[test]
    fn test_hourly_conversion() {
        // $18/hr * 37.5 h/week * 52 / 12 = $2925.00
        let mut s = source(Money::from_dollars(18), IncomeFrequency::Hourly);
        s.hours_per_week = Some(37.5);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(2925));
    }

    #[test]
    fn test_hourly_without_hours_fails() {
        let s = source(Money::from_dollars(18), IncomeFrequency::Hourly);
        let err = monthly_income(&s).unwrap_err();
        assert!(
            matches!(err, EligibilityError::InvalidInput { field, .. } if field == "hours_per_week")
        );
    }

    #[test]
    fn test_linearity_in_amount() {
        for frequency in [
            IncomeFrequency::Weekly,
            IncomeFrequency::Biweekly,
            IncomeFrequency::SemiMonthly,
            IncomeFrequency::Monthly,
            IncomeFrequency::Annual,
        ] {
            let single = monthly_income(&source(Money::from_dollars(750), frequency)).unwrap();
            let double = monthly_income(&source(Money::from_dollars(1500), frequency)).unwrap();
            assert_eq!(double, single.mul_rational(2, 1), "{:?}", frequency);
        }
    }

    #[test]
    fn test_irregular_average() {
        let mut s = source(Money::zero(), IncomeFrequency::Irregular);
        s.irregular_months = vec![
            IrregularMonth {
                month: "2025-01".into(),
                amount: Money::from_dollars(1000),
            },
            IrregularMonth {
                month: "2025-02".into(),
                amount: Money::from_dollars(2000),
            },
        ];
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(1500));
    }

    #[test]
    fn test_irregular_duplicate_months_summed() {
        let mut s = source(Money::zero(), IncomeFrequency::Irregular);
        s.irregular_months = vec![
            IrregularMonth {
                month: "2025-01".into(),
                amount: Money::from_dollars(400),
            },
            IrregularMonth {
                month: "2025-01".into(),
                amount: Money::from_dollars(600),
            },
            IrregularMonth {
                month: "2025-02".into(),
                amount: Money::from_dollars(2000),
            },
        ];
        // Two distinct months: (1000 + 2000) / 2
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(1500));
    }

    #[test]
    fn test_irregular_empty_fails() {
        let s = source(Money::zero(), IncomeFrequency::Irregular);
        let err = monthly_income(&s).unwrap_err();
        assert!(
            matches!(err, EligibilityError::InsufficientData { field, .. } if field == "irregular_months")
        );
    }

    #[test]
    fn test_irregular_flag_on_other_frequency() {
        // is_irregular takes precedence over the declared frequency
        let mut s = source(Money::from_dollars(5000), IncomeFrequency::Monthly);
        s.is_irregular = true;
        s.irregular_months = vec![IrregularMonth {
            month: "2025-03".into(),
            amount: Money::from_dollars(800),
        }];
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(800));
    }

    #[test]
    fn test_business_expenses_subtracted() {
        let mut s = IncomeSource::new(
            IncomeType::SelfEmployment,
            "Cleaning business",
            Money::from_dollars(5000),
            IncomeFrequency::Monthly,
        );
        s.business_expenses = Money::from_dollars(1200);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(3800));
    }

    #[test]
    fn test_business_expenses_floor_at_zero() {
        let mut s = IncomeSource::new(
            IncomeType::SelfEmployment,
            "Cleaning business",
            Money::from_dollars(5000),
            IncomeFrequency::Monthly,
        );
        s.business_expenses = Money::from_dollars(6000);
        assert_eq!(monthly_income(&s).unwrap(), Money::zero());
    }

    #[test]
    fn test_business_expenses_before_multiplier() {
        // ($1000 - $400) weekly * 52 / 12 = $2600.00
        let mut s = IncomeSource::new(
            IncomeType::SelfEmployment,
            "Market stall",
            Money::from_dollars(1000),
            IncomeFrequency::Weekly,
        );
        s.business_expenses = Money::from_dollars(400);
        assert_eq!(monthly_income(&s).unwrap(), Money::from_dollars(2600));
    }

    #[test]
    fn test_expense_conversions() {
        use crate::models::{Expense, ExpenseType};

        let weekly = Expense::new(
            ExpenseType::ChildCare,
            Money::from_dollars(300),
            ExpenseFrequency::Weekly,
        );
        assert_eq!(monthly_expense(&weekly).unwrap(), Money::from_dollars(1300));

        let quarterly = Expense::new(
            ExpenseType::PropertyTax,
            Money::from_dollars(900),
            ExpenseFrequency::Quarterly,
        );
        assert_eq!(monthly_expense(&quarterly).unwrap(), Money::from_dollars(300));

        let annual = Expense::new(
            ExpenseType::HomeownersInsurance,
            Money::from_dollars(1800),
            ExpenseFrequency::Annual,
        );
        assert_eq!(monthly_expense(&annual).unwrap(), Money::from_dollars(150));
    }

    #[test]
    fn test_normalize_incomes_preserves_order_and_earned_flag() {
        let sources = vec![
            IncomeSource::new(
                IncomeType::SocialSecurity,
                "SSA",
                Money::from_dollars(1000),
                IncomeFrequency::Monthly,
            ),
            IncomeSource::new(
                IncomeType::W2Employment,
                "Warehouse",
                Money::from_dollars(1000),
                IncomeFrequency::Monthly,
            ),
        ];

        let normalized = normalize_incomes(&sources).unwrap();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].source_name, "SSA");
        assert!(!normalized[0].earned);
        assert!(normalized[1].earned);
    }

    #[test]
    fn test_normalize_incomes_fails_whole_batch() {
        let sources = vec![
            IncomeSource::new(
                IncomeType::W2Employment,
                "Warehouse",
                Money::from_dollars(1000),
                IncomeFrequency::Monthly,
            ),
            IncomeSource::new(
                IncomeType::W2Employment,
                "Diner",
                Money::from_dollars(18),
                IncomeFrequency::Hourly,
            ),
        ];
        assert!(normalize_incomes(&sources).is_err());
    }
}
