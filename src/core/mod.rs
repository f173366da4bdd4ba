pub mod config;
pub mod decision;
pub mod download;
pub mod github;
pub mod inventory;
pub mod progress;
pub mod version;
