//! Income source model
//!
//! An income source is one recurring (or irregular) stream of household
//! income. Its monthly figure is never stored; it is always derived from the
//! raw fields by the normalizer so that the two can never drift apart.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Category of income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    W2Employment,
    SelfEmployment,
    GigWork,
    Freelance,
    Seasonal,
    Tips,
    Commission,
    SocialSecurity,
    Ssi,
    Ssdi,
    Unemployment,
    ChildSupport,
    Alimony,
    Pension,
    RentalIncome,
    InvestmentIncome,
    Other,
}

impl IncomeType {
    /// Whether this income counts as earned for the earned-income deduction
    pub fn is_earned(&self) -> bool {
        matches!(
            self,
            Self::W2Employment
                | Self::SelfEmployment
                | Self::GigWork
                | Self::Freelance
                | Self::Seasonal
                | Self::Tips
                | Self::Commission
        )
    }
}

/// How often an income amount is received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFrequency {
    Hourly,
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
    Annual,
    Irregular,
}

/// One month of recorded irregular income, `month` in "YYYY-MM" format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrregularMonth {
    pub month: String,
    pub amount: Money,
}

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount,
    NegativeBusinessExpenses,
    MissingHours,
    NoIrregularMonths,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::NegativeBusinessExpenses => write!(f, "Business expenses cannot be negative"),
            Self::MissingHours => {
                write!(f, "Hourly income requires a positive hours_per_week")
            }
            Self::NoIrregularMonths => {
                write!(f, "Irregular income requires at least one recorded month")
            }
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A single stream of household income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub income_type: IncomeType,
    pub source_name: String,
    /// Per-period amount for the declared frequency (hourly rate when hourly)
    pub amount: Money,
    pub frequency: IncomeFrequency,
    /// Required when frequency is hourly; tenths of an hour are honored
    #[serde(default)]
    pub hours_per_week: Option<f64>,
    #[serde(default)]
    pub is_irregular: bool,
    #[serde(default)]
    pub irregular_months: Vec<IrregularMonth>,
    /// Subtracted before frequency conversion for self-employment income
    #[serde(default)]
    pub business_expenses: Money,
}

impl IncomeSource {
    /// Create a regular income source with no irregular history
    pub fn new(
        income_type: IncomeType,
        source_name: impl Into<String>,
        amount: Money,
        frequency: IncomeFrequency,
    ) -> Self {
        Self {
            income_type,
            source_name: source_name.into(),
            amount,
            frequency,
            hours_per_week: None,
            is_irregular: false,
            irregular_months: Vec::new(),
            business_expenses: Money::zero(),
        }
    }

    /// Whether the irregular averaging path applies
    pub fn uses_irregular_average(&self) -> bool {
        self.is_irregular || self.frequency == IncomeFrequency::Irregular
    }

    /// Validate the record before normalization
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if self.business_expenses.is_negative() {
            return Err(IncomeValidationError::NegativeBusinessExpenses);
        }
        if self.frequency == IncomeFrequency::Hourly
            && !self
                .hours_per_week
                .map(|h| h.is_finite() && h > 0.0)
                .unwrap_or(false)
        {
            return Err(IncomeValidationError::MissingHours);
        }
        if self.uses_irregular_average() && self.irregular_months.is_empty() {
            return Err(IncomeValidationError::NoIrregularMonths);
        }
        Ok(())
    }
}
