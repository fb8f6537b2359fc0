//! Core configuration model
//!
//! This module defines the entities a project configuration is made of
//! and the registry that owns them.

pub mod config;
pub mod sequence;
pub mod task;
pub mod variant;

pub use config::*;
pub use sequence::*;
pub use task::*;
pub use variant::*;
