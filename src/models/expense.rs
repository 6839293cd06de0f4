//! Expense model
//!
//! Recurring household expenses. Expense categories drive the SNAP deduction
//! math: shelter and utility costs feed the excess shelter deduction,
//! dependent-care and medical costs pass through as their own deductions.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Category of expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    Rent,
    Mortgage,
    PropertyTax,
    HomeownersInsurance,
    UtilitiesElectric,
    UtilitiesGas,
    UtilitiesWater,
    UtilitiesPhone,
    UtilitiesInternet,
    ChildCare,
    ChildSupportPaid,
    MedicalOutOfPocket,
    MedicalInsurancePremium,
    DependentCare,
    Other,
}

impl ExpenseType {
    /// Whether this expense counts toward shelter costs (housing + utilities)
    pub fn is_shelter(&self) -> bool {
        matches!(
            self,
            Self::Rent
                | Self::Mortgage
                | Self::PropertyTax
                | Self::HomeownersInsurance
                | Self::UtilitiesElectric
                | Self::UtilitiesGas
                | Self::UtilitiesWater
                | Self::UtilitiesPhone
                | Self::UtilitiesInternet
        )
    }

    /// Whether this expense counts toward the dependent-care deduction
    pub fn is_dependent_care(&self) -> bool {
        matches!(self, Self::ChildCare | Self::DependentCare)
    }

    /// Whether this expense counts toward the medical deduction
    pub fn is_medical(&self) -> bool {
        matches!(self, Self::MedicalOutOfPocket | Self::MedicalInsurancePremium)
    }
}

/// How often an expense is paid
///
/// Expenses have no hourly or irregular frequency; every expense converts to
/// a monthly figure with a fixed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseFrequency {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
    Quarterly,
    Annual,
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A single recurring household expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub expense_type: ExpenseType,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Money,
    pub frequency: ExpenseFrequency,
}

impl Expense {
    /// Create a new expense
    pub fn new(expense_type: ExpenseType, amount: Money, frequency: ExpenseFrequency) -> Self {
        Self {
            expense_type,
            description: None,
            amount,
            frequency,
        }
    }

    /// Validate the record before normalization
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelter_classification() {
        assert!(ExpenseType::Rent.is_shelter());
        assert!(ExpenseType::Mortgage.is_shelter());
        assert!(ExpenseType::PropertyTax.is_shelter());
        assert!(ExpenseType::HomeownersInsurance.is_shelter());
        assert!(ExpenseType::UtilitiesElectric.is_shelter());
        assert!(ExpenseType::UtilitiesInternet.is_shelter());
        assert!(!ExpenseType::ChildCare.is_shelter());
        assert!(!ExpenseType::MedicalOutOfPocket.is_shelter());
    }

    #[test]
    fn test_dependent_care_classification() {
        assert!(ExpenseType::ChildCare.is_dependent_care());
        assert!(ExpenseType::DependentCare.is_dependent_care());
        assert!(!ExpenseType::ChildSupportPaid.is_dependent_care());
    }

    #[test]
    fn test_medical_classification() {
        assert!(ExpenseType::MedicalOutOfPocket.is_medical());
        assert!(ExpenseType::MedicalInsurancePremium.is_medical());
        assert!(!ExpenseType::Rent.is_medical());
    }

    #[test]
    fn test_validation() {
        let expense = Expense::new(
            ExpenseType::Rent,
            Money::from_dollars(1200),
            ExpenseFrequency::Monthly,
        );
        assert!(expense.validate().is_ok());

        let expense = Expense::new(
            ExpenseType::Rent,
            Money::from_cents(-1),
            ExpenseFrequency::Monthly,
        );
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&ExpenseType::UtilitiesElectric).unwrap();
        assert_eq!(json, "\"utilities_electric\"");
        let json = serde_json::to_string(&ExpenseFrequency::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
    }
}
