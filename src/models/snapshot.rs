//! Eligibility snapshot model
//!
//! A snapshot is the immutable, append-only result of one calculation run.
//! It copies everything it was computed from (totals, thresholds, every
//! deduction component) so the determination can be audited or diffed later
//! without consulting live profile data. Snapshots are never mutated; newer
//! runs supersede older ones and history is retained.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// How long a snapshot stays fresh before callers should recalculate
pub const SNAPSHOT_TTL_DAYS: i64 = 30;

/// One income source's contribution to the monthly total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSourceBreakdown {
    pub source_name: String,
    pub monthly_amount: Money,
}

/// Full audit trail for a calculation run
///
/// Every threshold and deduction component is retained verbatim so that two
/// snapshots computed from identical inputs and rule tables serialize
/// byte-identically (timestamps excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDetails {
    // FPL thresholds used
    pub fpl_monthly: Money,
    pub gross_income_limit: Money,
    pub net_income_limit: Money,
    pub asset_limit: Money,

    // Income breakdown
    pub income_sources: Vec<IncomeSourceBreakdown>,

    // Deductions applied
    pub standard_deduction: Money,
    pub earned_income_deduction: Money,
    pub shelter_deduction: Money,
    pub dependent_care_deduction: Money,
    pub medical_deduction: Money,

    // Net income calculation
    pub gross_income: Money,
    pub total_deductions: Money,
    pub net_income: Money,

    /// Non-fatal findings, e.g. a household_size/composition mismatch
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// The rule-table context active when the snapshot was computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpecificData {
    pub state: String,
    pub program_name: String,
    pub income_limit: Money,
    pub asset_limit: Money,
    #[serde(default)]
    pub special_rules: Vec<String>,
}

/// Result of one eligibility calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySnapshot {
    pub user_id: String,

    // Income summary
    pub total_gross_monthly_income: Money,
    pub total_net_monthly_income: Money,
    pub total_monthly_expenses: Money,
    pub total_assets: Money,
    pub total_countable_assets: Money,

    // Household info
    pub household_size: u8,
    pub state: String,

    // SNAP eligibility
    pub snap_eligible: Option<bool>,
    pub snap_gross_income_test: Option<bool>,
    pub snap_net_income_test: Option<bool>,
    pub snap_asset_test: Option<bool>,
    pub snap_estimated_benefit: Option<Money>,

    // Medicaid eligibility
    pub medicaid_eligible: Option<bool>,
    pub medicaid_income_test: Option<bool>,
    pub medicaid_asset_test: Option<bool>,
    pub medicaid_category: Option<String>,

    // Calculation details
    pub calculation_details: CalculationDetails,
    pub state_specific_data: Option<StateSpecificData>,

    // Timestamps
    pub calculated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl EligibilitySnapshot {
    /// Compute the expiry timestamp for a snapshot calculated at `now`
    pub fn expiry_for(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(SNAPSHOT_TTL_DAYS)
    }

    /// Whether the snapshot is past its freshness boundary
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
