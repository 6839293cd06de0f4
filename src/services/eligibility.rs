//! Program eligibility rules engine
//!
//! Evaluates the SNAP income/asset tests and the Medicaid category decision
//! list against a household's normalized monthly figures. All thresholds come
//! from the rule table the caller resolved for the calculation date; nothing
//! here carries a default number.

use crate::config::{MedicaidRules, SnapRules};
use crate::models::{Money, UserProfile};

/// Outcome of the SNAP tests for one household
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapEvaluation {
    pub gross_income_test: bool,
    pub net_income_test: bool,
    pub asset_test: bool,
    pub eligible: bool,
    /// Estimated monthly benefit; `None` when ineligible
    pub estimated_benefit: Option<Money>,
    /// True when the gross test was waived for an elderly-or-disabled
    /// household with no earned income (it still counts as passed)
    pub gross_test_skipped: bool,
    pub fpl_monthly: Money,
    pub gross_income_limit: Money,
    pub net_income_limit: Money,
    pub asset_limit: Money,
}

/// Outcome of the Medicaid category decision for one household
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicaidEvaluation {
    /// Winning category name; `None` if no category matched
    pub category: Option<String>,
    pub income_test: bool,
    pub asset_test: bool,
    pub eligible: bool,
    pub fpl_monthly: Money,
    pub income_limit: Money,
}

/// Evaluate the SNAP gross income, net income, and asset tests
pub fn evaluate_snap(
    rules: &SnapRules,
    household_size: u8,
    has_elderly_or_disabled: bool,
    gross_monthly_income: Money,
    gross_earned_income: Money,
    net_monthly_income: Money,
    countable_assets: Money,
) -> SnapEvaluation {
    let fpl_monthly = rules.fpl.monthly_for(household_size);
    let gross_income_limit = fpl_monthly.percent(rules.gross_income_limit_pct);
    let net_income_limit = fpl_monthly.percent(rules.net_income_limit_pct);
    let asset_limit = rules.asset_limit_for(has_elderly_or_disabled);

    // Elderly-or-disabled households with no earned income skip the gross
    // test entirely; a skipped test counts as passed.
    let gross_test_skipped = has_elderly_or_disabled && gross_earned_income.is_zero();
    let gross_income_test = gross_test_skipped || gross_monthly_income <= gross_income_limit;
    let net_income_test = net_monthly_income <= net_income_limit;
    let asset_test = countable_assets <= asset_limit;

    let eligible = gross_income_test && net_income_test && asset_test;
    let estimated_benefit = if eligible {
        let counted_income = net_monthly_income.percent(rules.benefit_reduction_pct);
        Some(
            (rules.max_allotment_for(household_size) - counted_income).positive_or_zero(),
        )
    } else {
        None
    };

    SnapEvaluation {
        gross_income_test,
        net_income_test,
        asset_test,
        eligible,
        estimated_benefit,
        gross_test_skipped,
        fpl_monthly,
        gross_income_limit,
        net_income_limit,
        asset_limit,
    }
}

/// Evaluate Medicaid eligibility via the priority-ordered category list
pub fn evaluate_medicaid(
    rules: &MedicaidRules,
    profile: &UserProfile,
    gross_monthly_income: Money,
    countable_assets: Money,
) -> MedicaidEvaluation {
    let fpl_monthly = rules.fpl.monthly_for(profile.household_size);

    let category = match rules.select_category(profile) {
        Some(category) => category,
        None => {
            // No category matched the household; the table's decision list
            // is exhaustive when it ends in a catch-all, so this only
            // happens with deliberately narrow state data.
            return MedicaidEvaluation {
                category: None,
                income_test: false,
                asset_test: false,
                eligible: false,
                fpl_monthly,
                income_limit: Money::zero(),
            };
        }
    };

    let income_limit = fpl_monthly.percent(category.income_limit_pct);
    let income_test = gross_monthly_income <= income_limit;
    // A category with no asset limit is exempt from the asset test.
    let asset_test = match category.asset_limit {
        Some(limit) => countable_assets <= limit,
        None => true,
    };

    MedicaidEvaluation {
        category: Some(category.name.clone()),
        income_test,
        asset_test,
        eligible: income_test && asset_test,
        fpl_monthly,
        income_limit,
    }
}
