//! Net pay calculation.
//!
//! Composes the individual deduction rules into a [`PayrollResult`]. This is
//! the single entry point every caller uses, so the statutory arithmetic
//! lives in exactly one place.

use std::time::Instant;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, Deductions, PayrollResult};

use super::housing_levy::calculate_housing_levy;
use super::nssf::calculate_nssf;
use super::paye::calculate_paye;
use super::shif::calculate_shif;
use super::taxable_income::calculate_taxable_income;

/// Warning code emitted when a negative gross is clamped to zero.
pub const NEGATIVE_GROSS_WARNING: &str = "NEGATIVE_GROSS_CLAMPED";

/// Rounds an amount to a whole currency unit, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_to_whole_units;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_whole_units(Decimal::from_str("39617.15").unwrap()), Decimal::from(39617));
/// assert_eq!(round_to_whole_units(Decimal::from_str("10.5").unwrap()), Decimal::from(11));
/// ```
pub fn round_to_whole_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates statutory deductions and net pay for a monthly gross salary.
///
/// Negative gross is treated as zero and recorded as an audit warning.
/// Deductions keep full precision; `net` is rounded to whole units.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/ke_2025").unwrap();
/// let result = calculate_payroll(Decimal::from(50000), loader.config()).unwrap();
///
/// assert_eq!(result.deductions.nssf, Decimal::from(2160));
/// assert_eq!(result.deductions.shif, Decimal::from(1375));
/// assert_eq!(result.deductions.housing_levy, Decimal::from(750));
/// assert_eq!(result.deductions.paye, Decimal::from_str("6097.85").unwrap());
/// assert_eq!(result.net, Decimal::from(39617));
/// ```
pub fn calculate_payroll(gross: Decimal, config: &StatutoryConfig) -> EngineResult<PayrollResult> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let gross = if gross < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NEGATIVE_GROSS_WARNING.to_string(),
            message: format!("Gross salary {} is negative; using 0", gross.normalize()),
            severity: "low".to_string(),
        });
        Decimal::ZERO
    } else {
        gross
    };

    let nssf = calculate_nssf(gross, config.nssf(), 1)?;
    steps.push(nssf.audit_step);

    let shif = calculate_shif(gross, config.shif(), 2)?;
    steps.push(shif.audit_step);

    let housing_levy = calculate_housing_levy(gross, config.housing_levy(), 3)?;
    steps.push(housing_levy.audit_step);

    let taxable = calculate_taxable_income(
        gross,
        nssf.contribution,
        shif.amount,
        housing_levy.amount,
        4,
    )?;
    steps.push(taxable.audit_step);

    let paye = calculate_paye(taxable.taxable_income, config.paye(), 5)?;
    steps.push(paye.audit_step);

    let deductions = Deductions {
        paye: paye.paye,
        nssf: nssf.contribution,
        shif: shif.amount,
        housing_levy: housing_levy.amount,
    };
    let total_deductions = deductions.total()?;
    let unrounded_net = gross - total_deductions;
    let net = round_to_whole_units(unrounded_net).max(Decimal::ZERO);

    steps.push(AuditStep {
        step_number: 6,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        clause_ref: "Employment Act 2007, s.19".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "unrounded_net": unrounded_net.normalize().to_string(),
            "net": net.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} = {}, rounded to {}",
            gross.normalize(),
            total_deductions.normalize(),
            unrounded_net.normalize(),
            net.normalize()
        ),
    });

    Ok(PayrollResult {
        gross,
        net,
        taxable_income: taxable.taxable_income,
        deductions,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
