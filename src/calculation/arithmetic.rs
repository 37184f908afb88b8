//! Overflow-checked decimal helpers shared by the deduction rules.
//!
//! Table values come from configuration, so products such as
//! `tier2_cap * rate * multiplier` are not bounded by the code itself.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

pub(crate) fn mul(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

pub(crate) fn sub(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("arithmetic overflow computing {}", what),
    }
}
