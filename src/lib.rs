pub mod config;
pub mod error;
pub mod github;
pub mod profile;
pub mod report;
pub mod scoring;
pub mod server;
