pub mod activities;
pub mod auth;
pub mod events;
pub mod health;
pub mod scores;
pub mod shared;
pub mod teams;
