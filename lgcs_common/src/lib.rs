//! LGCS Common Library
//!
//! This crate provides the shared vocabulary of the Landing Gear Control
//! System workspace: gear positions, the hydraulic fault line, the event
//! model and configuration loading.
//!
//! # Module Structure
//!
//! - [`gear`] - Gear position, fault, event and configuration types
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Performance requirements and default paths
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use lgcs_common::prelude::*;
//!
//! let line = HydraulicFaultLine::new();
//! line.inject();
//! assert!(line.is_active());
//! assert_eq!(GearPosition::DownLocked.label(), "DOWN_LOCKED");
//! ```

pub mod config;
pub mod consts;
pub mod gear;
pub mod prelude;
