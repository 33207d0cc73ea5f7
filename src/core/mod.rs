//! Core types, configuration, and error handling

pub mod config;
pub mod error;
pub mod types;
