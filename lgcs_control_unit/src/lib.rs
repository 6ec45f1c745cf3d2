//! # LGCS Control Unit
//!
//! Landing gear sequencing for a single gear set, with hydraulic fault
//! handling and an operator menu.
//!
//! ```text
//!   operator ──► shell::menu ──► state::machine::GearStateMachine
//!                                   │        │          │
//!                              FaultSource PacingClock EventSink
//!                                   │        │          │
//!                   HydraulicFaultLine  ThreadClock  Fanout(LogFileSink, TracingSink)
//! ```
//!
//! Commands block the caller for the modeled transition time. Every state
//! change and rejection is reported through the event sink; nothing is
//! returned as an error.
//!
//! ## Fault Policies
//!
//! 1. **Degraded**: a fault sampled at command start routes deployment via
//!    the backup pump and aborts retraction to DOWN_LOCKED.
//! 2. **ImmediateGate**: a fault sampled at command start drives the gear
//!    to FAULT until the fault is cleared.

pub mod clock;
pub mod config;
pub mod error;
pub mod shell;
pub mod state;

pub use clock::{PacingClock, SimulatedClock, ThreadClock};
pub use error::{LgcsError, LogSinkError};
pub use state::machine::{ClearOutcome, CommandOutcome, GearStateMachine, TransitionSummary};
