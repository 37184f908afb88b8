//! Affordable Housing Levy calculation.

use rust_decimal::Decimal;

use crate::config::HousingLevyConfig;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic::mul;

/// Rule identifier recorded in the audit trace.
pub const HOUSING_LEVY_RULE_ID: &str = "housing_levy";

/// The result of the housing levy calculation.
#[derive(Debug, Clone)]
pub struct HousingLevyResult {
    /// The levy withheld.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the flat-rate housing levy on gross pay.
pub fn calculate_housing_levy(
    gross: Decimal,
    config: &HousingLevyConfig,
    step_number: u32,
) -> EngineResult<HousingLevyResult> {
    let amount = mul(gross, config.rate, "housing levy")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: HOUSING_LEVY_RULE_ID.to_string(),
        rule_name: "Affordable Housing Levy".to_string(),
        clause_ref: config.clause.clone(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "rate": config.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            gross.normalize(),
            config.rate.normalize(),
            amount.normalize()
        ),
    };

    Ok(HousingLevyResult { amount, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> HousingLevyConfig {
        HousingLevyConfig {
            clause: "Affordable Housing Act 2024, s.4".to_string(),
            rate: dec("0.015"),
        }
    }

    #[test]
    fn test_levy_is_flat_rate() {
        let result = calculate_housing_levy(dec("50000"), &config(), 3).unwrap();

        assert_eq!(result.amount, dec("750"));
        assert_eq!(result.audit_step.rule_id, HOUSING_LEVY_RULE_ID);
        assert_eq!(result.audit_step.reasoning, "50000 x 0.015 = 750");
    }

    #[test]
    fn test_levy_keeps_fractional_cents() {
        let result = calculate_housing_levy(dec("12345.67"), &config(), 3).unwrap();
        assert_eq!(result.amount, dec("185.18505"));
    }

    #[test]
    fn test_zero_gross() {
        let result = calculate_housing_levy(Decimal::ZERO, &config(), 3).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
    }
}
