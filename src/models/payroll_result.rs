//! Payroll result models for the payroll engine.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures: the statutory [`Deductions`] breakdown and the audit trace
//! recording how every figure was reached.
//!
//! Monetary fields serialize as JSON numbers so the wire shape is
//! `{ gross, net, deductions: { PAYE, NSSF, SHIF, HousingLevy } }`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::arithmetic::add;
use crate::error::EngineResult;

/// The four statutory deductions withheld from gross pay.
///
/// Amounts are kept at full precision; only the net figure is rounded.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Deductions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deductions = Deductions {
///     paye: Decimal::from_str("6097.85").unwrap(),
///     nssf: Decimal::from(2160),
///     shif: Decimal::from(1375),
///     housing_levy: Decimal::from(750),
/// };
/// assert_eq!(deductions.total().unwrap(), Decimal::from_str("10382.85").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deductions {
    /// Income tax after personal relief.
    #[serde(rename = "PAYE", with = "rust_decimal::serde::float")]
    pub paye: Decimal,
    /// Tiered pension contribution.
    #[serde(rename = "NSSF", with = "rust_decimal::serde::float")]
    pub nssf: Decimal,
    /// Health insurance levy.
    #[serde(rename = "SHIF", with = "rust_decimal::serde::float")]
    pub shif: Decimal,
    /// Affordable housing levy.
    #[serde(rename = "HousingLevy", with = "rust_decimal::serde::float")]
    pub housing_levy: Decimal,
}

impl Deductions {
    /// Sum of all four deductions.
    ///
    /// Returns `CalculationError` if the sum leaves the decimal range.
    pub fn total(&self) -> EngineResult<Decimal> {
        let contributions = add(self.nssf, self.shif, "total deductions")?;
        let contributions = add(contributions, self.housing_levy, "total deductions")?;
        add(contributions, self.paye, "total deductions")
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute behind this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag input that was adjusted rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll estimate.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AuditTrace, Deductions, PayrollResult};
/// use rust_decimal::Decimal;
///
/// let result = PayrollResult {
///     gross: Decimal::ZERO,
///     net: Decimal::ZERO,
///     taxable_income: Decimal::ZERO,
///     deductions: Deductions::default(),
///     audit_trace: AuditTrace::default(),
/// };
/// assert_eq!(result.net, result.gross - result.deductions.total().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Gross pay the deductions were computed from (after clamping to zero).
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// Take-home pay, rounded to a whole currency unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Gross less NSSF, SHIF and housing levy; the base for PAYE.
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    /// Statutory deductions at full precision.
    pub deductions: Deductions,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_deductions() -> Deductions {
        Deductions {
            paye: dec("6097.85"),
            nssf: dec("2160"),
            shif: dec("1375"),
            housing_levy: dec("750"),
        }
    }

    #[test]
    fn test_deductions_total() {
        assert_eq!(sample_deductions().total().unwrap(), dec("10382.85"));
        assert_eq!(Deductions::default().total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_deductions_total_overflow_is_calculation_error() {
        let deductions = Deductions {
            nssf: Decimal::MAX,
            ..sample_deductions()
        };

        match deductions.total() {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("total deductions"))
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_deductions_serialize_with_statutory_names() {
        let json = serde_json::to_value(sample_deductions()).unwrap();

        assert_eq!(json["NSSF"].as_f64().unwrap(), 2160.0);
        assert_eq!(json["SHIF"].as_f64().unwrap(), 1375.0);
        assert_eq!(json["HousingLevy"].as_f64().unwrap(), 750.0);
        assert!((json["PAYE"].as_f64().unwrap() - 6097.85).abs() < 1e-9);
    }

    #[test]
    fn test_monetary_fields_serialize_as_numbers() {
        let result = PayrollResult {
            gross: dec("50000"),
            net: dec("39617"),
            taxable_income: dec("45715"),
            deductions: sample_deductions(),
            audit_trace: AuditTrace::default(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["gross"].is_number());
        assert!(json["net"].is_number());
        assert!(json["deductions"]["PAYE"].is_number());
        assert_eq!(json["net"].as_f64().unwrap(), 39617.0);
    }

    #[test]
    fn test_audit_trace_serializes_steps() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "nssf".to_string(),
                rule_name: "NSSF Contribution".to_string(),
                clause_ref: "NSSF Act 2013, s.20".to_string(),
                input: serde_json::json!({ "gross": "50000" }),
                output: serde_json::json!({ "contribution": "2160" }),
                reasoning: "(7000 + 29000) x 0.06 = 2160".to_string(),
            }],
            warnings: vec![],
            duration_us: 12,
        };

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["steps"][0]["rule_id"], "nssf");
        assert_eq!(json["duration_us"], 12);
    }
}
