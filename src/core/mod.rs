//! Core abstractions shared across the console

pub mod config;
pub mod error;
pub mod log;
pub mod quote;

// Re-export main types for cleaner imports
pub use error::{Error, Result};
pub use quote::{Quote, QuoteProvider};
