//! Core data models for the payroll engine.
//!
//! This module contains the domain models returned by the calculator.

mod payroll_result;

pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, Deductions, PayrollResult};
