//! Statutory payroll estimator for Kenyan salaries.
//!
//! This crate computes PAYE, NSSF, SHIF and the Affordable Housing Levy for a
//! monthly gross salary and derives net pay, and exposes the calculation over
//! an HTTP API alongside the website's contact-form endpoint.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
