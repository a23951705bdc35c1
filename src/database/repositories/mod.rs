pub mod activity;
pub mod admin;
pub mod event;
pub mod score;
pub mod team;

// Re-export all repositories for easy importing
pub use activity::ActivityRepository;
pub use admin::AdminRepository;
pub use event::EventRepository;
pub use score::ScoreRepository;
pub use team::TeamRepository;
