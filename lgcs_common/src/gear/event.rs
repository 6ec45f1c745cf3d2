//! Gear events and event sinks.
//!
//! The gear machine emits an ordered stream of [`GearEvent`]s while a
//! command executes. Sinks only observe; state transitions never depend on
//! whether or how events are consumed.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::state::{Direction, GearPosition};

/// Why a gear command was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Down commanded while already down and locked.
    AlreadyDown,
    /// Up commanded while already up and locked.
    AlreadyUp,
    /// A transition is still in progress.
    InTransit,
    /// Machine is parked in `Fault`.
    FaultLatched,
}

impl RejectReason {
    /// Operator-facing text.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::AlreadyDown => "Command rejected - Gear already DOWN",
            Self::AlreadyUp => "Command rejected - Gear already UP",
            Self::InTransit => "Command rejected - Gear in transit",
            Self::FaultLatched => "Command rejected - Hydraulic fault active, clear fault first",
        }
    }
}

/// Event severity, used by sinks to pick a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Normal sequencing.
    Info,
    /// Rejections and advisories.
    Warning,
    /// Performance exceedance, fault diagnosis, failsafe.
    Alert,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum EventKind {
    /// Machine constructed.
    SystemInitialised,
    /// Machine returned to its initial position.
    SystemReset,
    /// Command illegal for the current position.
    CommandRejected(RejectReason),
    /// Extension started.
    Deploying,
    /// Retraction started.
    Retracting,
    /// Transition did not finish within its performance requirement.
    TimeExceeded(Direction),
    /// Fault diagnosis.
    LowHydraulicPressure,
    /// Backup pump engaged for extension.
    BackupPumpActivated,
    /// Backup pump finished the extension.
    BackupOperationComplete,
    /// Hydraulic fault flag dropped.
    FaultCleared,
    /// Extension complete.
    DownLocked,
    /// Retraction complete.
    UpLocked,
    /// Retraction abandoned.
    RetractionAborted,
    /// Gear parked down after an aborted retraction.
    FailsafeDown,
    /// Maintenance advisory after a failsafe abort.
    MaintenanceRequired,
    /// Command inhibited, machine parked in `Fault`.
    CommandInhibited,
    /// Hydraulic fault injected.
    FaultInjected,
    /// Fault cleared and the pre-fault position restored.
    SystemRestored,
    /// Clear requested with no fault present.
    NoFaultToClear,
}

impl EventKind {
    /// Fixed message text.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::SystemInitialised => "System initialised",
            Self::SystemReset => "System reset - gear returned to initial position",
            Self::CommandRejected(reason) => reason.message(),
            Self::Deploying => "Gear deploying...",
            Self::Retracting => "Gear retracting...",
            Self::TimeExceeded(Direction::Down) => "*** ALERT: Gear down time exceeded parameter",
            Self::TimeExceeded(Direction::Up) => "*** ALERT: Gear up time exceeded parameter",
            Self::LowHydraulicPressure => "*** ROOT CAUSE: Low hydraulic pressure - primary pump",
            Self::BackupPumpActivated => "*** Activating backup hydraulic pump ***",
            Self::BackupOperationComplete => {
                "*** Backup operation complete - hydraulic maintenance required ***"
            }
            Self::FaultCleared => "Hydraulic fault cleared",
            Self::DownLocked => "Gear down and locked",
            Self::UpLocked => "Gear up and locked",
            Self::RetractionAborted => "*** FAILSAFE: Gear retraction aborted ***",
            Self::FailsafeDown => "*** Gear remains DOWN in failsafe mode ***",
            Self::MaintenanceRequired => "*** Hydraulic maintenance required ***",
            Self::CommandInhibited => "*** HYDRAULIC FAULT: command inhibited, gear held ***",
            Self::FaultInjected => "Hydraulic fault injected",
            Self::SystemRestored => "Fault cleared - system restored",
            Self::NoFaultToClear => "No fault to clear",
        }
    }

    /// Severity of the event.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::TimeExceeded(_)
            | Self::LowHydraulicPressure
            | Self::RetractionAborted
            | Self::FailsafeDown
            | Self::CommandInhibited => Severity::Alert,
            Self::CommandRejected(_)
            | Self::BackupPumpActivated
            | Self::BackupOperationComplete
            | Self::MaintenanceRequired
            | Self::FaultInjected => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// One timestamped event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearEvent {
    /// Local wall-clock time of emission.
    pub timestamp: DateTime<Local>,
    /// Position at emission time.
    pub position: GearPosition,
    /// What happened.
    pub kind: EventKind,
}

impl GearEvent {
    /// Stamp an event with the current local time.
    pub fn now(position: GearPosition, kind: EventKind) -> Self {
        Self {
            timestamp: Local::now(),
            position,
            kind,
        }
    }

    /// Message text of the event kind.
    #[inline]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// One-line JSON rendering.
    pub fn to_json_line(&self) -> String {
        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "state": self.position.label(),
            "severity": self.kind.severity(),
            "event": self.kind,
            "message": self.kind.message(),
        })
        .to_string()
    }
}

impl fmt::Display for GearEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.position.label(),
            self.kind.message()
        )
    }
}

/// Consumer of gear events.
pub trait EventSink: Send {
    /// Observe one event. Must not fail; sinks report their own I/O trouble.
    fn record(&mut self, event: &GearEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &GearEvent) {
        (**self).record(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn record(&mut self, _event: &GearEvent) {}
}

/// In-memory event log with shared handles.
///
/// Clone the recorder before handing it to a machine to keep a reading
/// handle.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GearEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events.
    pub fn events(&self) -> Vec<GearEvent> {
        self.events.lock().clone()
    }

    /// Kinds of all recorded events, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<GearEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventRecorder {
    fn record(&mut self, event: &GearEvent) {
        self.events.lock().push(*event);
    }
}

/// Forwards each event to several sinks in insertion order.
#[derive(Default)]
pub struct Fanout {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl EventSink for Fanout {
    fn record(&mut self, event: &GearEvent) {
        for sink in &mut self.sinks {
            sink.record(event);
        }
    }
}
