//! Rule set loading and lookup
//!
//! A `RuleSet` is the explicit configuration object passed into every engine
//! call. It is loaded from versioned YAML (or JSON) policy files at startup
//! or on demand; lookups resolve (state, program, calculation date) to the
//! table active at that time and fail loudly when nothing matches. The
//! engine never falls back to a hardcoded national figure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EligibilityError, EligibilityResult};

use super::tables::{MedicaidRules, Program, ProgramRules, RuleTable, SnapRules};

/// A collection of versioned, effective-dated rule tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    tables: Vec<RuleTable>,
}

impl RuleSet {
    /// Build a rule set from tables, validating each one
    pub fn new(tables: Vec<RuleTable>) -> EligibilityResult<Self> {
        for table in &tables {
            table.validate().map_err(EligibilityError::Config)?;
        }
        Ok(Self { tables })
    }

    /// Parse a rule set from a YAML policy file's contents
    pub fn from_yaml_str(contents: &str) -> EligibilityResult<Self> {
        let parsed: Self = serde_yaml::from_str(contents)?;
        Self::new(parsed.tables)
    }

    /// Parse a rule set from JSON
    pub fn from_json_str(contents: &str) -> EligibilityResult<Self> {
        let parsed: Self = serde_json::from_str(contents)?;
        Self::new(parsed.tables)
    }

    /// Load a rule set from a YAML file on disk
    pub fn load(path: impl AsRef<Path>) -> EligibilityResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EligibilityError::Io(format!(
                "Failed to read rule file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// All tables in the set
    pub fn tables(&self) -> &[RuleTable] {
        &self.tables
    }

    /// Resolve the rule table for (state, program) active on `as_of`
    ///
    /// With multiple effective periods covering the same date, the table
    /// with the newest `effective_from` wins, deterministically.
    pub fn lookup(
        &self,
        state: &str,
        program: Program,
        as_of: NaiveDate,
    ) -> EligibilityResult<&RuleTable> {
        let mut state_matched = false;
        let mut program_matched = false;
        let mut best: Option<&RuleTable> = None;

        for table in &self.tables {
            if !table.covers_state(state) {
                continue;
            }
            state_matched = true;
            if table.rules.program() != program {
                continue;
            }
            program_matched = true;
            if !table.is_effective(as_of) {
                continue;
            }
            if best
                .map(|b| table.effective_from > b.effective_from)
                .unwrap_or(true)
            {
                best = Some(table);
            }
        }

        match best {
            Some(table) => Ok(table),
            None if !state_matched => Err(EligibilityError::UnsupportedState(state.to_string())),
            None if !program_matched => Err(EligibilityError::UnsupportedProgram {
                state: state.to_string(),
                program: program.to_string(),
            }),
            None => Err(EligibilityError::StaleConfiguration {
                state: state.to_string(),
                program: program.to_string(),
                as_of,
            }),
        }
    }

    /// Resolve SNAP rules for a state and date
    pub fn snap_rules(&self, state: &str, as_of: NaiveDate) -> EligibilityResult<&SnapRules> {
        match &self.lookup(state, Program::Snap, as_of)?.rules {
            ProgramRules::Snap(rules) => Ok(rules),
            // lookup already filtered by program
            ProgramRules::Medicaid(_) => unreachable!(),
        }
    }

    /// Resolve Medicaid rules for a state and date
    pub fn medicaid_rules(
        &self,
        state: &str,
        as_of: NaiveDate,
    ) -> EligibilityResult<&MedicaidRules> {
        match &self.lookup(state, Program::Medicaid, as_of)?.rules {
            ProgramRules::Medicaid(rules) => Ok(rules),
            ProgramRules::Snap(_) => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
tables:
  - state: CA
    effective_from: 2024-10-01
    effective_to: 2025-09-30
    program: snap
    program_name: CalFresh
    fpl:
      first_person: 130417
      per_additional_person: 45833
    gross_income_limit_pct: 130
    net_income_limit_pct: 100
    standard_deduction: [20400, 20400, 20400, 21700, 25400, 29100]
    earned_income_deduction_pct: 20
    shelter_deduction_cap: 71200
    medical_expense_floor: 3500
    asset_limit: 300000
    asset_limit_elderly_disabled: 450000
    max_allotment: [29200, 53600, 76800, 97500, 115800, 139000, 153600, 175600]
    allotment_per_additional_person: 22000
    benefit_reduction_pct: 30
  - state: CA
    effective_from: 2023-10-01
    effective_to: 2024-09-30
    program: snap
    program_name: CalFresh
    fpl:
      first_person: 121250
      per_additional_person: 42917
    gross_income_limit_pct: 130
    net_income_limit_pct: 100
    standard_deduction: [19800, 19800, 19800, 20800, 24400, 27900]
    earned_income_deduction_pct: 20
    shelter_deduction_cap: 67200
    medical_expense_floor: 3500
    asset_limit: 275000
    asset_limit_elderly_disabled: 425000
    max_allotment: [29100, 53500, 76600, 97300, 115500, 138600, 153200, 175100]
    allotment_per_additional_person: 21900
    benefit_reduction_pct: 30
  - state: CA
    effective_from: 2025-01-01
    program: medicaid
    program_name: Medi-Cal
    fpl:
      first_person: 130417
      per_additional_person: 45833
    categories:
      - name: child
        criterion: { type: child_under, max_age: 19 }
        income_limit_pct: 266
      - name: aged_disabled
        criterion: { type: aged_or_disabled }
        income_limit_pct: 138
      - name: adult
        criterion: { type: adult }
        income_limit_pct: 138
"#;

    fn march_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_parse_yaml() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        assert_eq!(rules.tables().len(), 3);
    }

    #[test]
    fn test_lookup_picks_effective_table() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();

        let current = rules.snap_rules("CA", march_2025()).unwrap();
        assert_eq!(current.shelter_deduction_cap.cents(), 71200);

        // A date inside the prior fiscal year resolves to the older table
        let prior = rules
            .snap_rules("CA", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap();
        assert_eq!(prior.shelter_deduction_cap.cents(), 67200);
    }

    #[test]
    fn test_lookup_overlapping_periods_newest_wins() {
        let mut parsed = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        // Extend the old table so both cover March 2025
        let tables = &mut parsed.tables;
        for t in tables.iter_mut() {
            if t.effective_from == NaiveDate::from_ymd_opt(2023, 10, 1).unwrap() {
                t.effective_to = None;
            }
        }
        let rules = RuleSet::new(parsed.tables).unwrap();

        let resolved = rules.snap_rules("CA", march_2025()).unwrap();
        assert_eq!(resolved.shelter_deduction_cap.cents(), 71200);
    }

    #[test]
    fn test_unsupported_state() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        let err = rules.snap_rules("FL", march_2025()).unwrap_err();
        assert!(matches!(err, EligibilityError::UnsupportedState(s) if s == "FL"));
    }

    #[test]
    fn test_unsupported_program() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        // Drop the medicaid table, keep CA snap
        let tables: Vec<_> = rules
            .tables()
            .iter()
            .filter(|t| t.rules.program() == Program::Snap)
            .cloned()
            .collect();
        let rules = RuleSet::new(tables).unwrap();

        let err = rules.medicaid_rules("CA", march_2025()).unwrap_err();
        assert!(matches!(
            err,
            EligibilityError::UnsupportedProgram { state, program }
                if state == "CA" && program == "medicaid"
        ));
    }

    #[test]
    fn test_stale_configuration() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        let err = rules
            .snap_rules("CA", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, EligibilityError::StaleConfiguration { .. }));
    }

    #[test]
    fn test_state_lookup_is_case_insensitive() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        assert!(rules.snap_rules("ca", march_2025()).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, SAMPLE_YAML).unwrap();

        let rules = RuleSet::load(&path).unwrap();
        assert_eq!(rules.tables().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleSet::load("/nonexistent/rules.yaml").unwrap_err();
        assert!(matches!(err, EligibilityError::Io(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let rules = RuleSet::from_yaml_str(SAMPLE_YAML).unwrap();
        let json = serde_json::to_string(&rules).unwrap();
        let reparsed = RuleSet::from_json_str(&json).unwrap();
        assert_eq!(rules, reparsed);
    }
}
