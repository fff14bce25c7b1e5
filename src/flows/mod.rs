//! Flows module - Multi-step commands
//!
//! Provides:
//! - manual: flatten the documentation tree and render the PDF manual
//! - package: stage and export the plugin package

pub mod manual;
pub mod package;
