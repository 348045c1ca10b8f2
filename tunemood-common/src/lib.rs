//! # tunemood Common Library
//!
//! Shared code for the tunemood services:
//! - Error types
//! - Bootstrap configuration (TOML file + compiled defaults)
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
