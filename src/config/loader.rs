//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! deduction tables from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionsConfig, HousingLevyConfig, NssfConfig, PayeConfig, SchemeMetadata, ShifConfig,
    StatutoryConfig,
};

/// Loads and provides access to the statutory deduction tables.
///
/// # Directory Structure
///
/// ```text
/// config/ke_2025/
/// ├── scheme.yaml         # Scheme metadata
/// ├── contributions.yaml  # NSSF, SHIF and housing levy parameters
/// └── paye.yaml           # Income tax bands and personal relief
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ke_2025")?;
/// println!("Loaded scheme: {}", loader.scheme().name);
/// println!("Personal relief: {}", loader.personal_relief());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The tables are inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let contributions = Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let paye = Self::load_yaml::<PayeConfig>(&path.join("paye.yaml"))?;

        let config = StatutoryConfig::new(metadata, contributions, paye)?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StatutoryConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the NSSF parameters.
    pub fn nssf(&self) -> &NssfConfig {
        self.config.nssf()
    }

    /// Returns the SHIF parameters.
    pub fn shif(&self) -> &ShifConfig {
        self.config.shif()
    }

    /// Returns the housing levy parameters.
    pub fn housing_levy(&self) -> &HousingLevyConfig {
        self.config.housing_levy()
    }

    /// Returns the monthly personal relief.
    pub fn personal_relief(&self) -> Decimal {
        self.config.paye().personal_relief
    }

    /// Returns the PAYE configuration.
    pub fn paye(&self) -> &PayeConfig {
        self.config.paye()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ke_2025"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.scheme().code, "KE-2025");
        assert_eq!(loader.scheme().currency, "KES");
    }

    #[test]
    fn test_nssf_tiers_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.nssf().tier1_cap, dec("7000"));
        assert_eq!(loader.nssf().tier2_cap, dec("36000"));
        assert_eq!(loader.nssf().rate, dec("0.06"));
        assert_eq!(loader.nssf().contribution_multiplier, Decimal::ONE);
    }

    #[test]
    fn test_levies_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.shif().rate, dec("0.0275"));
        assert_eq!(loader.shif().cap, None);
        assert_eq!(loader.housing_levy().rate, dec("0.015"));
    }

    #[test]
    fn test_paye_bands_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let uppers: Vec<Option<Decimal>> = loader.paye().bands.iter().map(|b| b.upper).collect();
        assert_eq!(
            uppers,
            vec![
                Some(dec("24000")),
                Some(dec("32333")),
                Some(dec("500000")),
                Some(dec("800000")),
                None
            ]
        );
        assert_eq!(loader.paye().bands[3].rate, dec("0.325"));
        assert_eq!(loader.personal_relief(), dec("2400"));
    }

    #[test]
    fn test_legacy_tables_load_with_cap_and_multiplier() {
        let loader = ConfigLoader::load("./tests/fixtures/legacy_backend").unwrap();

        assert_eq!(loader.nssf().contribution_multiplier, dec("2"));
        assert_eq!(loader.shif().cap, Some(dec("5000")));
        assert_eq!(loader.paye().bands.len(), 2);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("scheme.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_broken_yaml_returns_parse_error() {
        let result = ConfigLoader::load("./tests/fixtures/broken");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("contributions.yaml"));
            }
            _ => panic!("Expected ConfigParseError error"),
        }
    }
}
