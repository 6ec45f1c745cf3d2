//! Gear state machine.
//!
//! - [`machine`] - `GearStateMachine`, command preconditions and fault API
//! - [`sequence`] - Step lists for nominal, backup-pump, failsafe and
//!   inhibit transitions

pub mod machine;
pub mod sequence;
