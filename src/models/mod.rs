//! Core data models for the benefits engine
//!
//! This module contains all the data structures that represent the benefits
//! screening domain: household profiles, income sources, expenses, assets,
//! and the eligibility snapshot the engine produces.

pub mod asset;
pub mod expense;
pub mod household;
pub mod income;
pub mod money;
pub mod snapshot;

pub use asset::{countable_assets, total_assets, Asset, AssetType};
pub use expense::{Expense, ExpenseFrequency, ExpenseType};
pub use household::{
    CitizenshipStatus, EmploymentStatus, HouseholdMember, HouseholdRelationship, UserProfile,
};
pub use income::{IncomeFrequency, IncomeSource, IncomeType, IrregularMonth};
pub use money::Money;
pub use snapshot::{
    CalculationDetails, EligibilitySnapshot, IncomeSourceBreakdown, StateSpecificData,
    SNAPSHOT_TTL_DAYS,
};
