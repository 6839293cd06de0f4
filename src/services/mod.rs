//! Calculation pipeline for the benefits engine
//!
//! Four stages, each pure and synchronous: normalization, deductions,
//! per-program evaluation, and snapshot assembly. Data flows one way through
//! them; `build_snapshot` is the single entry point callers normally use.

pub mod deductions;
pub mod eligibility;
pub mod normalize;
pub mod snapshot;

pub use deductions::{compute_net_income, excess_shelter_deduction, DeductionBreakdown};
pub use eligibility::{evaluate_medicaid, evaluate_snap, MedicaidEvaluation, SnapEvaluation};
pub use normalize::{
    monthly_expense, monthly_income, normalize_expenses, normalize_incomes, NormalizedExpense,
    NormalizedIncome,
};
pub use snapshot::build_snapshot;
