//! Configuration module for onboard-cli
//!
//! This module provides configuration management including:
//! - Base directory resolution (env override or platform config dir)
//! - Settings persistence (partner redirect, timings, logging)

pub mod paths;
pub mod settings;

pub use paths::OnboardPaths;
pub use settings::Settings;
