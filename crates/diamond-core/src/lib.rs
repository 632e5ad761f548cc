// Shared types and configuration for the softball stats dashboard.

pub mod config;
pub mod model;
