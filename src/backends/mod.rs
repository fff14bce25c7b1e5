//! Backends module - External tool checks
//!
//! Provides:
//! - doctor: Dependency checking for the renderer and the editor

pub mod doctor;
