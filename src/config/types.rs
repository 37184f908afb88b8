//! Configuration types for statutory payroll deductions.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the validation
//! applied once they are loaded.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about the statutory scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// Short code for the scheme (e.g., "KE-2025").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// ISO 4217 currency code of every amount in the scheme.
    pub currency: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the authority publishing the tables.
    pub source_url: String,
}

fn default_contribution_multiplier() -> Decimal {
    Decimal::ONE
}

/// Tiered pension (NSSF) contribution parameters.
///
/// Tier I covers pay up to `tier1_cap`; Tier II covers pay between
/// `tier1_cap` and `tier2_cap`. Pay above `tier2_cap` is not pensionable.
#[derive(Debug, Clone, Deserialize)]
pub struct NssfConfig {
    /// Reference to the statute defining the contribution.
    pub clause: String,
    /// Upper limit of Tier I pensionable pay.
    pub tier1_cap: Decimal,
    /// Upper limit of Tier II pensionable pay.
    pub tier2_cap: Decimal,
    /// Contribution rate applied to both tiers.
    pub rate: Decimal,
    /// Factor applied to the employee share (2 also counts the employer match).
    #[serde(default = "default_contribution_multiplier")]
    pub contribution_multiplier: Decimal,
}

/// Health insurance levy (SHIF) parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ShifConfig {
    /// Reference to the statute defining the levy.
    pub clause: String,
    /// Rate applied to gross pay.
    pub rate: Decimal,
    /// Optional ceiling on the monthly levy.
    #[serde(default)]
    pub cap: Option<Decimal>,
}

/// Affordable Housing Levy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct HousingLevyConfig {
    /// Reference to the statute defining the levy.
    pub clause: String,
    /// Rate applied to gross pay.
    pub rate: Decimal,
}

/// Contributions configuration file structure (`contributions.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Pension contribution.
    pub nssf: NssfConfig,
    /// Health insurance levy.
    pub shif: ShifConfig,
    /// Housing levy.
    pub housing_levy: HousingLevyConfig,
}

/// One marginal income tax band.
///
/// A band taxes the slice of taxable income between the previous band's
/// upper bound (or zero) and its own `upper`. The last band has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBand {
    /// Inclusive upper bound of the band, `None` for the top band.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Marginal rate for income inside the band.
    pub rate: Decimal,
}

/// PAYE configuration file structure (`paye.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PayeConfig {
    /// Reference to the statute defining the bands.
    pub clause: String,
    /// Monthly personal relief subtracted from computed tax.
    pub personal_relief: Decimal,
    /// Marginal bands, lowest first.
    pub bands: Vec<TaxBand>,
}

/// The complete statutory configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    metadata: SchemeMetadata,
    contributions: ContributionsConfig,
    paye: PayeConfig,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    ///
    /// Returns `InvalidConfig` if any table is inconsistent; see [`StatutoryConfig::validate`].
    pub fn new(
        metadata: SchemeMetadata,
        contributions: ContributionsConfig,
        paye: PayeConfig,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            contributions,
            paye,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the NSSF parameters.
    pub fn nssf(&self) -> &NssfConfig {
        &self.contributions.nssf
    }

    /// Returns the SHIF parameters.
    pub fn shif(&self) -> &ShifConfig {
        &self.contributions.shif
    }

    /// Returns the housing levy parameters.
    pub fn housing_levy(&self) -> &HousingLevyConfig {
        &self.contributions.housing_levy
    }

    /// Returns the PAYE bands and relief.
    pub fn paye(&self) -> &PayeConfig {
        &self.paye
    }

    /// Checks that every table can be applied to any non-negative gross.
    ///
    /// Rates must lie in `[0, 1]`, caps and relief must be non-negative,
    /// `tier1_cap <= tier2_cap`, band bounds must strictly ascend and only
    /// the last band may be unbounded.
    pub fn validate(&self) -> EngineResult<()> {
        let nssf = self.nssf();
        check_rate("nssf.rate", nssf.rate)?;
        check_non_negative("nssf.tier1_cap", nssf.tier1_cap)?;
        check_non_negative("nssf.contribution_multiplier", nssf.contribution_multiplier)?;
        if nssf.tier2_cap < nssf.tier1_cap {
            return Err(invalid(
                "nssf.tier2_cap",
                format!(
                    "{} is below tier1_cap {}",
                    nssf.tier2_cap.normalize(),
                    nssf.tier1_cap.normalize()
                ),
            ));
        }

        let shif = self.shif();
        check_rate("shif.rate", shif.rate)?;
        if let Some(cap) = shif.cap {
            check_non_negative("shif.cap", cap)?;
        }

        check_rate("housing_levy.rate", self.housing_levy().rate)?;

        let paye = self.paye();
        check_non_negative("paye.personal_relief", paye.personal_relief)?;
        if paye.bands.is_empty() {
            return Err(invalid("paye.bands", "at least one band is required"));
        }

        let last = paye.bands.len() - 1;
        let mut previous_upper = Decimal::ZERO;
        for (index, band) in paye.bands.iter().enumerate() {
            check_rate(&format!("paye.bands[{}].rate", index), band.rate)?;
            match (band.upper, index == last) {
                (Some(upper), false) => {
                    if upper <= previous_upper {
                        return Err(invalid(
                            &format!("paye.bands[{}].upper", index),
                            format!(
                                "{} must be greater than {}",
                                upper.normalize(),
                                previous_upper.normalize()
                            ),
                        ));
                    }
                    previous_upper = upper;
                }
                (None, true) => {}
                (Some(_), true) => {
                    return Err(invalid(
                        &format!("paye.bands[{}].upper", index),
                        "the last band must be unbounded",
                    ));
                }
                (None, false) => {
                    return Err(invalid(
                        &format!("paye.bands[{}].upper", index),
                        "only the last band may be unbounded",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(
            field,
            format!("{} must be between 0 and 1", rate.normalize()),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(
            field,
            format!("{} must not be negative", value.normalize()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn metadata() -> SchemeMetadata {
        SchemeMetadata {
            code: "TEST".to_string(),
            name: "Test scheme".to_string(),
            currency: "KES".to_string(),
            version: "2025-01-01".to_string(),
            source_url: "https://example.invalid".to_string(),
        }
    }

    fn contributions() -> ContributionsConfig {
        ContributionsConfig {
            nssf: NssfConfig {
                clause: "NSSF Act 2013".to_string(),
                tier1_cap: dec("7000"),
                tier2_cap: dec("36000"),
                rate: dec("0.06"),
                contribution_multiplier: Decimal::ONE,
            },
            shif: ShifConfig {
                clause: "SHI Act 2023".to_string(),
                rate: dec("0.0275"),
                cap: None,
            },
            housing_levy: HousingLevyConfig {
                clause: "Affordable Housing Act 2024".to_string(),
                rate: dec("0.015"),
            },
        }
    }

    fn paye(bands: Vec<TaxBand>) -> PayeConfig {
        PayeConfig {
            clause: "Income Tax Act".to_string(),
            personal_relief: dec("2400"),
            bands,
        }
    }

    fn band(upper: Option<&str>, rate: &str) -> TaxBand {
        TaxBand {
            upper: upper.map(dec),
            rate: dec(rate),
        }
    }

    fn field_of(result: EngineResult<StatutoryConfig>) -> String {
        match result {
            Err(EngineError::InvalidConfig { field, .. }) => field,
            other => panic!("Expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_valid_config_is_accepted() {
        let config = StatutoryConfig::new(
            metadata(),
            contributions(),
            paye(vec![band(Some("24000"), "0.10"), band(None, "0.30")]),
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let mut contributions = contributions();
        contributions.shif.rate = dec("1.5");
        let result = StatutoryConfig::new(metadata(), contributions, paye(vec![band(None, "0.1")]));
        assert_eq!(field_of(result), "shif.rate");
    }

    #[test]
    fn test_tier2_below_tier1_is_rejected() {
        let mut contributions = contributions();
        contributions.nssf.tier2_cap = dec("5000");
        let result = StatutoryConfig::new(metadata(), contributions, paye(vec![band(None, "0.1")]));
        assert_eq!(field_of(result), "nssf.tier2_cap");
    }

    #[test]
    fn test_empty_bands_are_rejected() {
        let result = StatutoryConfig::new(metadata(), contributions(), paye(vec![]));
        assert_eq!(field_of(result), "paye.bands");
    }

    #[test]
    fn test_bounded_last_band_is_rejected() {
        let result = StatutoryConfig::new(
            metadata(),
            contributions(),
            paye(vec![band(Some("24000"), "0.10"), band(Some("32333"), "0.25")]),
        );
        assert_eq!(field_of(result), "paye.bands[1].upper");
    }

    #[test]
    fn test_unbounded_middle_band_is_rejected() {
        let result = StatutoryConfig::new(
            metadata(),
            contributions(),
            paye(vec![band(None, "0.10"), band(None, "0.25")]),
        );
        assert_eq!(field_of(result), "paye.bands[0].upper");
    }

    #[test]
    fn test_descending_bands_are_rejected() {
        let result = StatutoryConfig::new(
            metadata(),
            contributions(),
            paye(vec![
                band(Some("32333"), "0.10"),
                band(Some("24000"), "0.25"),
                band(None, "0.30"),
            ]),
        );
        assert_eq!(field_of(result), "paye.bands[1].upper");
    }

    #[test]
    fn test_negative_relief_is_rejected() {
        let mut paye = paye(vec![band(None, "0.1")]);
        paye.personal_relief = dec("-1");
        let result = StatutoryConfig::new(metadata(), contributions(), paye);
        assert_eq!(field_of(result), "paye.personal_relief");
    }

    #[test]
    fn test_multiplier_defaults_to_one() {
        let yaml = "clause: \"NSSF Act 2013\"\ntier1_cap: 7000\ntier2_cap: 36000\nrate: \"0.06\"\n";
        let nssf: NssfConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(nssf.contribution_multiplier, Decimal::ONE);
    }
}
