//! Asset model
//!
//! Household resources counted against program asset limits. Exempt assets
//! (primary home, retirement accounts where state policy excludes them) are
//! flagged per-record by the intake flow; the engine only sums what remains.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Category of asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    CheckingAccount,
    SavingsAccount,
    Cash,
    Stocks,
    Bonds,
    #[serde(rename = "retirement_401k")]
    Retirement401k,
    RetirementIra,
    VehiclePrimary,
    VehicleAdditional,
    PropertyPrimaryHome,
    PropertyOther,
    LifeInsuranceCashValue,
    Other,
}

/// Validation errors for assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetValidationError {
    NegativeValue,
}

impl std::fmt::Display for AssetValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeValue => write!(f, "Asset value cannot be negative"),
        }
    }
}

impl std::error::Error for AssetValidationError {}

/// A single household asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_type: AssetType,
    #[serde(default)]
    pub description: Option<String>,
    pub current_value: Money,
    #[serde(default)]
    pub is_exempt: bool,
    #[serde(default)]
    pub exemption_reason: Option<String>,
}

impl Asset {
    /// Create a new countable (non-exempt) asset
    pub fn new(asset_type: AssetType, current_value: Money) -> Self {
        Self {
            asset_type,
            description: None,
            current_value,
            is_exempt: false,
            exemption_reason: None,
        }
    }

    /// Mark the asset exempt with a reason
    pub fn exempt(mut self, reason: impl Into<String>) -> Self {
        self.is_exempt = true;
        self.exemption_reason = Some(reason.into());
        self
    }

    /// Validate the record before totaling
    pub fn validate(&self) -> Result<(), AssetValidationError> {
        if self.current_value.is_negative() {
            return Err(AssetValidationError::NegativeValue);
        }
        Ok(())
    }
}

/// Total value of all assets
pub fn total_assets(assets: &[Asset]) -> Money {
    assets.iter().map(|a| a.current_value).sum()
}

/// Total value of non-exempt assets, for asset-limit tests
pub fn countable_assets(assets: &[Asset]) -> Money {
    assets
        .iter()
        .filter(|a| !a.is_exempt)
        .map(|a| a.current_value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countable_excludes_exempt() {
        let assets = vec![
            Asset::new(AssetType::CheckingAccount, Money::from_dollars(500)),
            Asset::new(AssetType::PropertyPrimaryHome, Money::from_dollars(250_000))
                .exempt("primary residence"),
            Asset::new(AssetType::SavingsAccount, Money::from_dollars(1200)),
        ];

        assert_eq!(total_assets(&assets), Money::from_dollars(251_700));
        assert_eq!(countable_assets(&assets), Money::from_dollars(1700));
    }

    #[test]
    fn test_empty_assets() {
        assert_eq!(total_assets(&[]), Money::zero());
        assert_eq!(countable_assets(&[]), Money::zero());
    }

    #[test]
    fn test_validation() {
        let asset = Asset::new(AssetType::Cash, Money::from_cents(-1));
        assert_eq!(asset.validate(), Err(AssetValidationError::NegativeValue));

        let asset = Asset::new(AssetType::Cash, Money::zero());
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&AssetType::Retirement401k).unwrap();
        assert_eq!(json, "\"retirement_401k\"");
        let json = serde_json::to_string(&AssetType::LifeInsuranceCashValue).unwrap();
        assert_eq!(json, "\"life_insurance_cash_value\"");
    }
}
