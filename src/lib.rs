//! Benefits eligibility calculation engine
//!
//! This library turns self-reported household financial records (income
//! sources, expenses, assets) into a reproducible, auditable
//! `EligibilitySnapshot` for SNAP and Medicaid screening. It is a pure
//! computation core: the calling web backend loads the records and persists
//! the snapshot; the engine performs no I/O of its own beyond optionally
//! loading rule-table files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: versioned, effective-dated program rule tables
//! - `error`: custom error types
//! - `models`: core data models (profile, income, expenses, assets, snapshot)
//! - `services`: the calculation pipeline (normalize, deduct, evaluate, build)
//!
//! # Example
//!
//! ```rust,ignore
//! use benefits_engine::{build_snapshot, RuleSet};
//!
//! let rules = RuleSet::load("rules/fy2025.yaml")?;
//! let snapshot = build_snapshot(&profile, &incomes, &expenses, &assets, &rules, Utc::now())?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::RuleSet;
pub use error::{EligibilityError, EligibilityResult};
pub use services::build_snapshot;
