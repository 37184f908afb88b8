//! NSSF pension contribution calculation.
//!
//! The contribution is tiered on pensionable pay:
//! - **Tier I:** pay up to `tier1_cap`
//! - **Tier II:** pay between `tier1_cap` and `tier2_cap`
//!
//! Pay above `tier2_cap` attracts no contribution. Both tiers use the same
//! rate; the configured multiplier scales the result (2 counts the employer
//! match alongside the employee share).

use rust_decimal::Decimal;

use crate::config::NssfConfig;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic::mul;

/// Rule identifier recorded in the audit trace.
pub const NSSF_RULE_ID: &str = "nssf_contribution";

/// The result of the NSSF calculation.
#[derive(Debug, Clone)]
pub struct NssfResult {
    /// Pensionable pay falling in Tier I.
    pub tier1_base: Decimal,
    /// Pensionable pay falling in Tier II.
    pub tier2_base: Decimal,
    /// The total contribution withheld.
    pub contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the tiered NSSF contribution for a non-negative gross.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_nssf;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/ke_2025").unwrap();
/// let result = calculate_nssf(Decimal::from(50000), loader.nssf(), 1).unwrap();
///
/// assert_eq!(result.tier1_base, Decimal::from(7000));
/// assert_eq!(result.tier2_base, Decimal::from(29000));
/// assert_eq!(result.contribution, Decimal::from(2160));
/// ```
pub fn calculate_nssf(
    gross: Decimal,
    config: &NssfConfig,
    step_number: u32,
) -> EngineResult<NssfResult> {
    let tier1_base = gross.min(config.tier1_cap);
    let tier2_base = (gross.min(config.tier2_cap) - config.tier1_cap).max(Decimal::ZERO);
    let pensionable = tier1_base + tier2_base;

    let employee_share = mul(pensionable, config.rate, "NSSF contribution")?;
    let contribution = mul(
        employee_share,
        config.contribution_multiplier,
        "NSSF contribution",
    )?;

    let reasoning = if config.contribution_multiplier == Decimal::ONE {
        format!(
            "Tier I {} + Tier II {} = {} pensionable x {} = {}",
            tier1_base.normalize(),
            tier2_base.normalize(),
            pensionable.normalize(),
            config.rate.normalize(),
            contribution.normalize()
        )
    } else {
        format!(
            "Tier I {} + Tier II {} = {} pensionable x {} x {} = {}",
            tier1_base.normalize(),
            tier2_base.normalize(),
            pensionable.normalize(),
            config.rate.normalize(),
            config.contribution_multiplier.normalize(),
            contribution.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: NSSF_RULE_ID.to_string(),
        rule_name: "NSSF Contribution".to_string(),
        clause_ref: config.clause.clone(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "tier1_cap": config.tier1_cap.normalize().to_string(),
            "tier2_cap": config.tier2_cap.normalize().to_string(),
            "rate": config.rate.normalize().to_string(),
            "contribution_multiplier": config.contribution_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "tier1_base": tier1_base.normalize().to_string(),
            "tier2_base": tier2_base.normalize().to_string(),
            "contribution": contribution.normalize().to_string()
        }),
        reasoning,
    };

    Ok(NssfResult {
        tier1_base,
        tier2_base,
        contribution,
        audit_step,
    })
}
