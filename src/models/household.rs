//! Household and user profile models
//!
//! A profile describes the applicant's household as self-reported through the
//! intake forms: who lives together, where, and the applicant's status flags.
//! Snapshots copy this data at calculation time and never reference it live.

use serde::{Deserialize, Serialize};

/// SNAP treats members aged 60 or over as elderly
pub const ELDERLY_AGE: u8 = 60;

/// Relationship of a household member to the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdRelationship {
    #[serde(rename = "self")]
    SelfMember,
    Spouse,
    Child,
    Parent,
    Sibling,
    Grandparent,
    Grandchild,
    OtherRelative,
    Unrelated,
}

/// Citizenship status options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenshipStatus {
    Citizen,
    PermanentResident,
    QualifiedImmigrant,
    Other,
}

/// Employment status options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    SelfEmployed,
    Retired,
    Disabled,
    Student,
}

/// A single member of the household
///
/// The elderly flag is stored independently of age; `is_effectively_elderly`
/// reconciles the two (stored flag OR age >= 60).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub name: String,
    pub age: u8,
    pub relationship: HouseholdRelationship,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_elderly: bool,
}

impl HouseholdMember {
    /// Create a new household member with no disability/elderly flags
    pub fn new(name: impl Into<String>, age: u8, relationship: HouseholdRelationship) -> Self {
        Self {
            name: name.into(),
            age,
            relationship,
            is_disabled: false,
            is_elderly: false,
        }
    }

    /// Effective elderly status: the stored flag or age 60+
    pub fn is_effectively_elderly(&self) -> bool {
        self.is_elderly || self.age >= ELDERLY_AGE
    }

    /// Whether the member counts as elderly or disabled for deduction and
    /// asset-limit purposes
    pub fn is_elderly_or_disabled(&self) -> bool {
        self.is_effectively_elderly() || self.is_disabled
    }
}

/// Validation errors for user profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    ZeroHouseholdSize,
    EmptyState,
}

impl std::fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroHouseholdSize => write!(f, "household_size must be at least 1"),
            Self::EmptyState => write!(f, "state is required"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Self-reported applicant profile
///
/// `household_size` is authoritative for benefit-table lookups even when
/// `household_composition` is supplied; the engine flags a mismatch as a
/// non-fatal warning rather than failing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub household_size: u8,
    #[serde(default)]
    pub household_composition: Vec<HouseholdMember>,
    /// Two-letter postal code; supported states are defined by the loaded
    /// rule tables, not by this type
    pub state: String,
    pub citizenship_status: Option<CitizenshipStatus>,
    pub employment_status: Option<EmploymentStatus>,
}

impl UserProfile {
    /// Validate the profile before running a calculation
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.household_size == 0 {
            return Err(ProfileValidationError::ZeroHouseholdSize);
        }
        if self.state.trim().is_empty() {
            return Err(ProfileValidationError::EmptyState);
        }
        Ok(())
    }

    /// Whether any member is effectively elderly or disabled
    pub fn has_elderly_or_disabled_member(&self) -> bool {
        self.household_composition
            .iter()
            .any(HouseholdMember::is_elderly_or_disabled)
    }

    /// Whether the declared size disagrees with the supplied composition
    ///
    /// Only meaningful when a composition was supplied at all.
    pub fn composition_mismatch(&self) -> bool {
        !self.household_composition.is_empty()
            && self.household_composition.len() != self.household_size as usize
    }
}
