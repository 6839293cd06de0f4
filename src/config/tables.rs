//! Program rule table definitions
//!
//! Everything policy-sensitive lives here as data: FPL schedules, deduction
//! amounts, income and asset limits, benefit allotments, and Medicaid
//! category lists. Tables are plain serde structs so annual policy updates
//! ship as new data files, never as code changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Money, UserProfile};

/// Benefit program identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Snap,
    Medicaid,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snap => write!(f, "snap"),
            Self::Medicaid => write!(f, "medicaid"),
        }
    }
}

/// Federal Poverty Level schedule: first person plus a flat increment per
/// additional household member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FplSchedule {
    pub first_person: Money,
    pub per_additional_person: Money,
}

impl FplSchedule {
    /// Monthly FPL for a household of the given size
    pub fn monthly_for(&self, household_size: u8) -> Money {
        let additional = household_size.saturating_sub(1) as i64;
        self.first_person + self.per_additional_person.mul_rational(additional, 1)
    }
}

/// SNAP rule table for one state and effective period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapRules {
    /// State-branded program name, e.g. "CalFresh"
    pub program_name: String,
    pub fpl: FplSchedule,
    /// Gross income test threshold as a percentage of FPL (typically 130)
    pub gross_income_limit_pct: u32,
    /// Net income test threshold as a percentage of FPL (typically 100)
    pub net_income_limit_pct: u32,
    /// Standard deduction by household size; first entry is size 1, the last
    /// entry applies to all larger households
    pub standard_deduction: Vec<Money>,
    /// Earned-income deduction rate (typically 20)
    pub earned_income_deduction_pct: u32,
    /// Cap on the excess shelter deduction for households with no
    /// elderly-or-disabled member
    pub shelter_deduction_cap: Money,
    /// Medical expenses only count above this floor
    pub medical_expense_floor: Money,
    pub asset_limit: Money,
    pub asset_limit_elderly_disabled: Money,
    /// Maximum monthly allotment by household size; households beyond the
    /// table add `allotment_per_additional_person` per extra member
    pub max_allotment: Vec<Money>,
    pub allotment_per_additional_person: Money,
    /// Share of net income counted against the allotment (typically 30)
    pub benefit_reduction_pct: u32,
    #[serde(default)]
    pub special_rules: Vec<String>,
}

impl SnapRules {
    /// Standard deduction for a household size (last table entry covers
    /// larger households)
    pub fn standard_deduction_for(&self, household_size: u8) -> Money {
        let idx =
            (household_size.max(1) as usize - 1).min(self.standard_deduction.len().saturating_sub(1));
        self.standard_deduction.get(idx).copied().unwrap_or_default()
    }

    /// Maximum monthly allotment for a household size
    pub fn max_allotment_for(&self, household_size: u8) -> Money {
        let size = household_size.max(1) as usize;
        if let Some(amount) = self.max_allotment.get(size - 1) {
            return *amount;
        }
        let last = self.max_allotment.last().copied().unwrap_or_default();
        let extra = (size - self.max_allotment.len()) as i64;
        last + self.allotment_per_additional_person.mul_rational(extra, 1)
    }

    /// Asset limit, higher for elderly-or-disabled households
    pub fn asset_limit_for(&self, elderly_or_disabled: bool) -> Money {
        if elderly_or_disabled {
            self.asset_limit_elderly_disabled
        } else {
            self.asset_limit
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.standard_deduction.is_empty() {
            return Err("standard_deduction table is empty".into());
        }
        if self.max_allotment.is_empty() {
            return Err("max_allotment table is empty".into());
        }
        Ok(())
    }
}

/// Household predicate a Medicaid category matches on
///
/// The predicates themselves are code; rule tables reference them by name
/// and supply parameters, keeping category lists pure data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MedicaidCriterion {
    /// Household includes a member younger than `max_age`
    ChildUnder { max_age: u8 },
    /// Household includes an effectively elderly or disabled member
    AgedOrDisabled,
    /// Catch-all for adults; always matches
    Adult,
}

impl MedicaidCriterion {
    /// Whether the household matches this criterion
    pub fn matches(&self, profile: &UserProfile) -> bool {
        match self {
            Self::ChildUnder { max_age } => profile
                .household_composition
                .iter()
                .any(|m| m.age < *max_age),
            Self::AgedOrDisabled => profile.has_elderly_or_disabled_member(),
            Self::Adult => true,
        }
    }
}

/// One Medicaid eligibility category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicaidCategory {
    pub name: String,
    pub criterion: MedicaidCriterion,
    /// Income limit as a percentage of FPL
    pub income_limit_pct: u32,
    /// Countable-asset limit; `None` means the category is exempt from the
    /// asset test (MAGI categories)
    #[serde(default)]
    pub asset_limit: Option<Money>,
}

/// Medicaid rule table for one state and effective period
///
/// Categories are a priority-ordered decision list: the first category whose
/// criterion matches the household wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicaidRules {
    /// State-branded program name, e.g. "Medi-Cal"
    pub program_name: String,
    pub fpl: FplSchedule,
    pub categories: Vec<MedicaidCategory>,
    #[serde(default)]
    pub special_rules: Vec<String>,
}

impl MedicaidRules {
    /// Select the first category matching the household, in table order
    pub fn select_category(&self, profile: &UserProfile) -> Option<&MedicaidCategory> {
        self.categories.iter().find(|c| c.criterion.matches(profile))
    }

    fn validate(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err("medicaid category list is empty".into());
        }
        Ok(())
    }
}

/// Program-specific rules, tagged by program in the data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "program", rename_all = "lowercase")]
pub enum ProgramRules {
    Snap(SnapRules),
    Medicaid(MedicaidRules),
}

impl ProgramRules {
    pub fn program(&self) -> Program {
        match self {
            Self::Snap(_) => Program::Snap,
            Self::Medicaid(_) => Program::Medicaid,
        }
    }

    pub fn program_name(&self) -> &str {
        match self {
            Self::Snap(r) => &r.program_name,
            Self::Medicaid(r) => &r.program_name,
        }
    }
}

/// One versioned rule table: state + program + effective date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Two-letter postal code
    pub state: String,
    pub effective_from: NaiveDate,
    /// Inclusive end of the effective period; `None` means still current
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(flatten)]
    pub rules: ProgramRules,
}

impl RuleTable {
    /// Whether this table is authoritative on the given date
    pub fn is_effective(&self, as_of: NaiveDate) -> bool {
        as_of >= self.effective_from && self.effective_to.map(|to| as_of <= to).unwrap_or(true)
    }

    /// Whether this table covers the given state (case-insensitive)
    pub fn covers_state(&self, state: &str) -> bool {
        self.state.eq_ignore_ascii_case(state)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.state.trim().is_empty() {
            return Err("rule table has an empty state".into());
        }
        if let Some(to) = self.effective_to {
            if to < self.effective_from {
                return Err(format!(
                    "rule table for {} ends ({}) before it starts ({})",
                    self.state, to, self.effective_from
                ));
            }
        }
        match &self.rules {
            ProgramRules::Snap(r) => r.validate(),
            ProgramRules::Medicaid(r) => r.validate(),
        }
        .map_err(|e| format!("rule table for {}: {}", self.state, e))
    }
}
