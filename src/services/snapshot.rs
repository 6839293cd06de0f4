//! Snapshot builder
//!
//! Runs the full pipeline (normalize, deduct, evaluate per program) and
//! assembles the immutable `EligibilitySnapshot` with its audit trail. The
//! builder either produces a complete, internally-consistent snapshot or
//! fails; it never returns partial results and never persists anything
//! itself.

use chrono::{DateTime, Utc};

use crate::config::{Program, RuleSet};
use crate::error::{EligibilityError, EligibilityResult};
use crate::models::household::ProfileValidationError;
use crate::models::{
    countable_assets, total_assets, Asset, CalculationDetails, EligibilitySnapshot, Expense,
    IncomeSource, IncomeSourceBreakdown, Money, StateSpecificData, UserProfile,
};

use super::deductions::compute_net_income;
use super::eligibility::{evaluate_medicaid, evaluate_snap};
use super::normalize::{normalize_expenses, normalize_incomes};

/// Build an eligibility snapshot from already-loaded records
///
/// Pure and deterministic: identical inputs against an identical active rule
/// table produce identical output apart from `calculated_at`/`expires_at`.
/// The caller supplies `now`, which selects the effective rule tables and
/// stamps the snapshot.
pub fn build_snapshot(
    profile: &UserProfile,
    income_sources: &[IncomeSource],
    expenses: &[Expense],
    assets: &[Asset],
    rules: &RuleSet,
    now: DateTime<Utc>,
) -> EligibilityResult<EligibilitySnapshot> {
    profile.validate().map_err(|e| match e {
        ProfileValidationError::ZeroHouseholdSize => {
            EligibilityError::invalid_input("household_size", e.to_string())
        }
        ProfileValidationError::EmptyState => EligibilityError::invalid_input("state", e.to_string()),
    })?;
    for asset in assets {
        asset
            .validate()
            .map_err(|e| EligibilityError::invalid_input("current_value", e.to_string()))?;
    }

    let as_of = now.date_naive();
    let incomes = normalize_incomes(income_sources)?;
    let monthly_expenses = normalize_expenses(expenses)?;

    let total_monthly_expenses: Money =
        monthly_expenses.iter().map(|e| e.monthly_amount).sum();
    let total_asset_value = total_assets(assets);
    let total_countable = countable_assets(assets);
    let has_elderly_or_disabled = profile.has_elderly_or_disabled_member();

    // Both rule tables are resolved up front so a missing table fails the
    // whole run before any result is assembled.
    let snap_table = rules.lookup(&profile.state, Program::Snap, as_of)?;
    let snap_rules = rules.snap_rules(&profile.state, as_of)?;
    let medicaid_rules = rules.medicaid_rules(&profile.state, as_of)?;

    let breakdown = compute_net_income(
        &incomes,
        &monthly_expenses,
        profile.household_size,
        has_elderly_or_disabled,
        snap_rules,
    );

    let snap = evaluate_snap(
        snap_rules,
        profile.household_size,
        has_elderly_or_disabled,
        breakdown.gross_income,
        breakdown.gross_earned_income,
        breakdown.net_income,
        total_countable,
    );
    let medicaid = evaluate_medicaid(
        medicaid_rules,
        profile,
        breakdown.gross_income,
        total_countable,
    );

    let mut warnings = Vec::new();
    if profile.composition_mismatch() {
        warnings.push(format!(
            "household_size ({}) does not match household_composition ({} members); household_size was used",
            profile.household_size,
            profile.household_composition.len()
        ));
    }
    if snap.gross_test_skipped {
        warnings.push(
            "gross income test skipped: elderly or disabled household with no earned income"
                .to_string(),
        );
    }

    let calculation_details = CalculationDetails {
        fpl_monthly: snap.fpl_monthly,
        gross_income_limit: snap.gross_income_limit,
        net_income_limit: snap.net_income_limit,
        asset_limit: snap.asset_limit,
        income_sources: incomes
            .iter()
            .map(|i| IncomeSourceBreakdown {
                source_name: i.source_name.clone(),
                monthly_amount: i.monthly_amount,
            })
            .collect(),
        standard_deduction: breakdown.standard_deduction,
        earned_income_deduction: breakdown.earned_income_deduction,
        shelter_deduction: breakdown.shelter_deduction,
        dependent_care_deduction: breakdown.dependent_care_deduction,
        medical_deduction: breakdown.medical_deduction,
        gross_income: breakdown.gross_income,
        total_deductions: breakdown.total_deductions,
        net_income: breakdown.net_income,
        warnings,
    };

    let state_specific_data = Some(StateSpecificData {
        state: snap_table.state.clone(),
        program_name: snap_rules.program_name.clone(),
        income_limit: snap.gross_income_limit,
        asset_limit: snap.asset_limit,
        special_rules: snap_rules.special_rules.clone(),
    });

    Ok(EligibilitySnapshot {
        user_id: profile.user_id.clone(),
        total_gross_monthly_income: breakdown.gross_income,
        total_net_monthly_income: breakdown.net_income,
        total_monthly_expenses,
        total_assets: total_asset_value,
        total_countable_assets: total_countable,
        household_size: profile.household_size,
        state: profile.state.clone(),
        snap_eligible: Some(snap.eligible),
        snap_gross_income_test: Some(snap.gross_income_test),
        snap_net_income_test: Some(snap.net_income_test),
        snap_asset_test: Some(snap.asset_test),
        snap_estimated_benefit: snap.estimated_benefit,
        medicaid_eligible: Some(medicaid.eligible),
        medicaid_income_test: Some(medicaid.income_test),
        medicaid_asset_test: Some(medicaid.asset_test),
        medicaid_category: medicaid.category,
        calculation_details,
        state_specific_data,
        calculated_at: now,
        expires_at: EligibilitySnapshot::expiry_for(now),
    })
}
