//! Configuration loading and management for the payroll engine.
//!
//! This module loads the statutory deduction tables (pension tiers, levies,
//! income tax bands and relief) from YAML files, and resolves the server's
//! process settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ke_2025").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{DEFAULT_CONFIG_DIR, DEFAULT_PORT, ServerSettings};
pub use types::{
    ContributionsConfig, HousingLevyConfig, NssfConfig, PayeConfig, SchemeMetadata, ShifConfig,
    StatutoryConfig, TaxBand,
};
