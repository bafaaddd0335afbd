//! Utility modules for common functionality
//!
//! This module provides various utility functions and types used throughout the application.

pub mod logger;
pub mod format_utils;
pub mod parse_utils;
#[cfg(test)]
mod tests;
