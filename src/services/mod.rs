pub mod aggregation;
pub mod auth;
pub mod identity;
pub mod validation;

pub use auth::AuthService;
pub use identity::{GoogleIdTokenVerifier, IdentityVerifier, VerifiedIdentity};
