//! PAYE income tax calculation.
//!
//! Tax is charged progressively: each band taxes only the slice of taxable
//! income between the previous band's upper bound and its own. Personal
//! relief is then subtracted and the result floored at zero.
//!
//! ## Monthly bands (2024/2025)
//!
//! | Taxable income | Rate |
//! |---|---|
//! | up to 24,000 | 10% |
//! | 24,000 to 32,333 | 25% |
//! | 32,333 to 500,000 | 30% |
//! | 500,000 to 800,000 | 32.5% |
//! | above 800,000 | 35% |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayeConfig;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic::{add, mul};

/// Rule identifier recorded in the audit trace.
pub const PAYE_RULE_ID: &str = "paye";

/// Tax charged within a single band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    /// Lower bound of the band (exclusive).
    pub lower: Decimal,
    /// Upper bound of the band (inclusive), `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate of the band.
    pub rate: Decimal,
    /// Portion of taxable income falling in the band.
    pub taxed_amount: Decimal,
    /// Tax on that portion.
    pub tax: Decimal,
}

/// The result of the PAYE calculation.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Bands that taxed a non-zero slice, lowest first.
    pub bands: Vec<BandTax>,
    /// Sum of band taxes.
    pub tax_before_relief: Decimal,
    /// Relief actually used (never more than the tax).
    pub relief_applied: Decimal,
    /// Tax due after relief.
    pub paye: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates PAYE on taxable income.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_paye;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/ke_2025").unwrap();
/// let result = calculate_paye(Decimal::from(45715), loader.paye(), 5).unwrap();
///
/// assert_eq!(result.bands.len(), 3);
/// assert_eq!(result.tax_before_relief, Decimal::from_str("8497.85").unwrap());
/// assert_eq!(result.paye, Decimal::from_str("6097.85").unwrap());
/// ```
pub fn calculate_paye(
    taxable_income: Decimal,
    config: &PayeConfig,
    step_number: u32,
) -> EngineResult<PayeResult> {
    let mut bands = Vec::new();
    let mut tax_before_relief = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for band in &config.bands {
        if taxable_income <= lower {
            break;
        }

        let top = match band.upper {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        let taxed_amount = top - lower;
        let tax = mul(taxed_amount, band.rate, "PAYE band tax")?;
        tax_before_relief = add(tax_before_relief, tax, "PAYE")?;

        bands.push(BandTax {
            lower,
            upper: band.upper,
            rate: band.rate,
            taxed_amount,
            tax,
        });

        match band.upper {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    let relief_applied = config.personal_relief.min(tax_before_relief);
    let paye = (tax_before_relief - config.personal_relief).max(Decimal::ZERO);

    let band_lines: Vec<String> = bands
        .iter()
        .map(|b| {
            format!(
                "{} x {} = {}",
                b.taxed_amount.normalize(),
                b.rate.normalize(),
                b.tax.normalize()
            )
        })
        .collect();

    let reasoning = if bands.is_empty() {
        "No taxable income; PAYE is 0".to_string()
    } else if paye.is_zero() {
        format!(
            "{}; total {} fully offset by relief {}",
            band_lines.join("; "),
            tax_before_relief.normalize(),
            config.personal_relief.normalize()
        )
    } else {
        format!(
            "{}; total {} - relief {} = {}",
            band_lines.join("; "),
            tax_before_relief.normalize(),
            config.personal_relief.normalize(),
            paye.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: PAYE_RULE_ID.to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        clause_ref: config.clause.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "personal_relief": config.personal_relief.normalize().to_string()
        }),
        output: serde_json::json!({
            "bands": bands
                .iter()
                .map(|b| serde_json::json!({
                    "lower": b.lower.normalize().to_string(),
                    "upper": b.upper.map(|u| u.normalize().to_string()),
                    "rate": b.rate.normalize().to_string(),
                    "taxed_amount": b.taxed_amount.normalize().to_string(),
                    "tax": b.tax.normalize().to_string()
                }))
                .collect::<Vec<_>>(),
            "tax_before_relief": tax_before_relief.normalize().to_string(),
            "relief_applied": relief_applied.normalize().to_string(),
            "paye": paye.normalize().to_string()
        }),
        reasoning,
    };

    Ok(PayeResult {
        bands,
        tax_before_relief,
        relief_applied,
        paye,
        audit_step,
    })
}
