//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints: the net pay estimator at
//! `/api/payroll` and the contact-form echo at `/api/contact`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollRequest, parse_gross};
pub use response::{ApiError, ApiErrorResponse, ContactResponse, PayrollResponse};
pub use state::AppState;
