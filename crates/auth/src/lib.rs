//! `hearth-auth` — bearer-token authentication boundary.
//!
//! Decoupled from HTTP and storage: callers hand in a raw token and a clock
//! reading, and get back validated claims or an error.

pub mod claims;
pub mod validator;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use validator::{Hs256JwtValidator, JwtError, JwtValidator};
