//! coffer-auth: per-request authorization against the access-key table
//!
//! The policy table is loaded once at startup and immutable afterwards;
//! evaluation is stateless per request. Check order is fixed:
//! credential presence → credential validity → permission → store
//! allowlist → size quota, so a coarser failure is never masked by a
//! more specific one.

pub mod controller;
pub mod policy;

pub use controller::AccessController;
pub use policy::AccessPolicy;
