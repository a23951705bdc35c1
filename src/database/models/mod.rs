pub mod activity;
pub mod admin;
pub mod auth;
pub mod event;
pub mod team;

// Re-export all models for easy importing
pub use activity::*;
pub use admin::*;
pub use auth::*;
pub use event::*;
pub use team::*;
