//! Landing gear shared types.
//!
//! Everything the gear state machine and its collaborators (menu, log
//! sinks, fault injection control) need to agree on lives here, organized
//! by domain: position states, the hydraulic fault line, emitted events and
//! gear configuration.

pub mod config;
pub mod event;
pub mod fault;
pub mod state;
