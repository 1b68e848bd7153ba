//! Route Configuration Module
//!
//! All HTTP routes for the account backend live in `router`. Public session
//! routes (register, login, refresh) are mounted next to the protected
//! group, which sits behind the authentication middleware.

/// Main router creation
pub mod router;

pub use router::create_router;
