//! Taxable income derivation.
//!
//! PAYE is charged on gross pay less the pension contribution and both
//! levies. The result is floored at zero.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic::{add, sub};

/// Rule identifier recorded in the audit trace.
pub const TAXABLE_INCOME_RULE_ID: &str = "taxable_income";

/// The result of the taxable income derivation.
#[derive(Debug, Clone)]
pub struct TaxableIncomeResult {
    /// Income subject to PAYE.
    pub taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives taxable income from gross pay and the pre-tax deductions.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_taxable_income;
/// use rust_decimal::Decimal;
///
/// let result = calculate_taxable_income(
///     Decimal::from(50000),
///     Decimal::from(2160),
///     Decimal::from(1375),
///     Decimal::from(750),
///     4,
/// )
/// .unwrap();
/// assert_eq!(result.taxable_income, Decimal::from(45715));
/// ```
pub fn calculate_taxable_income(
    gross: Decimal,
    nssf: Decimal,
    shif: Decimal,
    housing_levy: Decimal,
    step_number: u32,
) -> EngineResult<TaxableIncomeResult> {
    let pre_tax = add(nssf, shif, "pre-tax deductions")?;
    let pre_tax = add(pre_tax, housing_levy, "pre-tax deductions")?;
    let taxable_income = sub(gross, pre_tax, "taxable income")?.max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: TAXABLE_INCOME_RULE_ID.to_string(),
        rule_name: "Taxable Income".to_string(),
        clause_ref: "Income Tax Act, s.3".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "nssf": nssf.normalize().to_string(),
            "shif": shif.normalize().to_string(),
            "housing_levy": housing_levy.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} - {} - {} = {}",
            gross.normalize(),
            nssf.normalize(),
            shif.normalize(),
            housing_levy.normalize(),
            taxable_income.normalize()
        ),
    };

    Ok(TaxableIncomeResult {
        taxable_income,
        audit_step,
    })
}
