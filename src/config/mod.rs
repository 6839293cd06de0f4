//! Configuration module for the benefits engine
//!
//! This module provides the policy-data layer:
//! - Rule table definitions (FPL schedules, deductions, limits, allotments)
//! - Versioned, effective-dated rule set loading and lookup
//!
//! Thresholds are never compiled in; annual policy updates ship as new data
//! files and the caller passes the loaded `RuleSet` into every calculation.

pub mod ruleset;
pub mod tables;

pub use ruleset::RuleSet;
pub use tables::{
    FplSchedule, MedicaidCategory, MedicaidCriterion, MedicaidRules, Program, ProgramRules,
    RuleTable, SnapRules,
};
