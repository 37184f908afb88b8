//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory deduction rules: the tiered NSSF
//! pension contribution, the SHIF health levy, the housing levy, taxable
//! income derivation, progressive PAYE with personal relief, and the net pay
//! composition that ties them together.

pub(crate) mod arithmetic;
mod housing_levy;
mod nssf;
mod paye;
mod payroll;
mod shif;
mod taxable_income;

pub use housing_levy::{HOUSING_LEVY_RULE_ID, HousingLevyResult, calculate_housing_levy};
pub use nssf::{NSSF_RULE_ID, NssfResult, calculate_nssf};
pub use paye::{BandTax, PAYE_RULE_ID, PayeResult, calculate_paye};
pub use payroll::{NEGATIVE_GROSS_WARNING, calculate_payroll, round_to_whole_units};
pub use shif::{SHIF_RULE_ID, ShifResult, calculate_shif};
pub use taxable_income::{TAXABLE_INCOME_RULE_ID, TaxableIncomeResult, calculate_taxable_income};
