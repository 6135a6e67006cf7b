pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod security;
pub mod version;
