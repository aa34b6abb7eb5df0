// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod models;
pub mod queries;
pub mod report;
pub mod seed;

#[cfg(test)]
mod test_utils;
