//! SNAP deduction calculator
//!
//! Applies the standard, earned-income, dependent-care, medical, and excess
//! shelter deductions to gross monthly income. Every component is retained
//! verbatim in the returned breakdown for the snapshot's audit trail.
//! Deductions are not individually capped against income; only the final net
//! figure floors at zero.

use crate::config::SnapRules;
use crate::models::Money;

use super::normalize::{NormalizedExpense, NormalizedIncome};

/// Net income and every deduction component that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionBreakdown {
    pub gross_income: Money,
    pub gross_earned_income: Money,
    pub standard_deduction: Money,
    pub earned_income_deduction: Money,
    pub dependent_care_deduction: Money,
    pub medical_deduction: Money,
    pub shelter_deduction: Money,
    pub total_deductions: Money,
    pub net_income: Money,
}

/// Excess shelter deduction: shelter costs above half of income after all
/// other deductions, capped unless the household has an elderly-or-disabled
/// member
///
/// This is the most policy-sensitive step of the net income calculation, so
/// it stands alone and is tested in isolation.
pub fn excess_shelter_deduction(
    shelter_costs: Money,
    income_after_other_deductions: Money,
    cap: Money,
    uncapped: bool,
) -> Money {
    let half_income = income_after_other_deductions.mul_rational(1, 2);
    let excess = (shelter_costs - half_income).positive_or_zero();
    if uncapped {
        excess
    } else {
        excess.min(cap)
    }
}

/// Compute net monthly income from normalized income and expenses
pub fn compute_net_income(
    incomes: &[NormalizedIncome],
    expenses: &[NormalizedExpense],
    household_size: u8,
    has_elderly_or_disabled: bool,
    rules: &SnapRules,
) -> DeductionBreakdown {
    let gross_income: Money = incomes.iter().map(|i| i.monthly_amount).sum();
    let gross_earned_income: Money = incomes
        .iter()
        .filter(|i| i.earned)
        .map(|i| i.monthly_amount)
        .sum();

    let standard_deduction = rules.standard_deduction_for(household_size);
    let earned_income_deduction =
        gross_earned_income.percent(rules.earned_income_deduction_pct);

    let dependent_care_deduction: Money = expenses
        .iter()
        .filter(|e| e.expense_type.is_dependent_care())
        .map(|e| e.monthly_amount)
        .sum();

    // Medical expenses count only above the floor, and only for households
    // with an elderly or disabled member.
    let medical_deduction = if has_elderly_or_disabled {
        let medical_costs: Money = expenses
            .iter()
            .filter(|e| e.expense_type.is_medical())
            .map(|e| e.monthly_amount)
            .sum();
        (medical_costs - rules.medical_expense_floor).positive_or_zero()
    } else {
        Money::zero()
    };

    let income_after_other_deductions = (gross_income
        - standard_deduction
        - earned_income_deduction
        - dependent_care_deduction
        - medical_deduction)
        .positive_or_zero();

    let shelter_costs: Money = expenses
        .iter()
        .filter(|e| e.expense_type.is_shelter())
        .map(|e| e.monthly_amount)
        .sum();
    let shelter_deduction = excess_shelter_deduction(
        shelter_costs,
        income_after_other_deductions,
        rules.shelter_deduction_cap,
        has_elderly_or_disabled,
    );

    let total_deductions = standard_deduction
        + earned_income_deduction
        + dependent_care_deduction
        + medical_deduction
        + shelter_deduction;
    let net_income = (gross_income - total_deductions).positive_or_zero();

    DeductionBreakdown {
        gross_income,
        gross_earned_income,
        standard_deduction,
        earned_income_deduction,
        dependent_care_deduction,
        medical_deduction,
        shelter_deduction,
        total_deductions,
        net_income,
    }
}
