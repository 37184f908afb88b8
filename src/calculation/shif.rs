//! SHIF health insurance levy calculation.
//!
//! The levy is a flat percentage of gross pay, optionally capped.

use rust_decimal::Decimal;

use crate::config::ShifConfig;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic::mul;

/// Rule identifier recorded in the audit trace.
pub const SHIF_RULE_ID: &str = "shif_levy";

/// The result of the SHIF calculation.
#[derive(Debug, Clone)]
pub struct ShifResult {
    /// The levy withheld.
    pub amount: Decimal,
    /// Whether the configured cap reduced the levy.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the SHIF levy for a non-negative gross.
pub fn calculate_shif(
    gross: Decimal,
    config: &ShifConfig,
    step_number: u32,
) -> EngineResult<ShifResult> {
    let uncapped = mul(gross, config.rate, "SHIF levy")?;

    let (amount, capped) = match config.cap {
        Some(cap) if uncapped > cap => (cap, true),
        _ => (uncapped, false),
    };

    let reasoning = if capped {
        format!(
            "{} x {} = {}, capped at {}",
            gross.normalize(),
            config.rate.normalize(),
            uncapped.normalize(),
            amount.normalize()
        )
    } else {
        format!(
            "{} x {} = {}",
            gross.normalize(),
            config.rate.normalize(),
            amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: SHIF_RULE_ID.to_string(),
        rule_name: "SHIF Levy".to_string(),
        clause_ref: config.clause.clone(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "rate": config.rate.normalize().to_string(),
            "cap": config.cap.map(|c| c.normalize().to_string())
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "capped": capped
        }),
        reasoning,
    };

    Ok(ShifResult {
        amount,
        capped,
        audit_step,
    })
}
