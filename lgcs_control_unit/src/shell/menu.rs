//! Operator menu.
//!
//! Reads one choice per line from any `BufRead`, drives the gear machine and
//! writes prompts and `[SYSTEM]` replies to any `Write`. Gear events are not
//! printed here; they reach the operator through the machine's event sink.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lgcs_common::gear::event::RejectReason;
use tracing::debug;

use crate::state::machine::{ClearOutcome, CommandOutcome, GearStateMachine};

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    GearUp,
    GearDown,
    InjectFault,
    ViewFaults,
    ClearFault,
    Reset,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::GearUp),
            "2" => Ok(Self::GearDown),
            "3" => Ok(Self::InjectFault),
            "4" => Ok(Self::ViewFaults),
            "5" => Ok(Self::ClearFault),
            "6" => Ok(Self::Reset),
            "q" | "Q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

/// Whether the loop keeps going after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Quit,
}

const RULE: &str = "==============================";

/// Interactive operator loop bound to one gear machine.
pub struct Menu<'a, R, W> {
    machine: &'a mut GearStateMachine,
    input: R,
    output: W,
    running: Arc<AtomicBool>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(machine: &'a mut GearStateMachine, input: R, output: W) -> Self {
        Self {
            machine,
            input,
            output,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag that stops the loop before the next prompt when cleared.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Prompt, read and dispatch until quit, EOF or the running flag drops.
    ///
    /// The flag is checked before each prompt and again after each read, so
    /// a line typed after Ctrl-C is never executed.
    pub fn run(&mut self) -> std::io::Result<()> {
        while self.running.load(Ordering::SeqCst) {
            self.show_menu()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("operator input closed");
                break;
            }
            // Shutdown requested while blocked on input: drop the line.
            if !self.running.load(Ordering::SeqCst) {
                debug!("shutdown requested, discarding pending input");
                break;
            }

            let flow = match line.parse::<MenuChoice>() {
                Ok(choice) => self.handle(choice)?,
                Err(()) => {
                    writeln!(self.output, "\nInvalid command. Please try again")?;
                    MenuFlow::Continue
                }
            };
            if flow == MenuFlow::Quit {
                break;
            }
        }
        self.output.flush()
    }

    fn show_menu(&mut self) -> std::io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "\n{RULE}")?;
        writeln!(out, "LANDING GEAR CONTROL SYSTEM")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Current Position: {}", self.machine.position().label())?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "1. Gear UP")?;
        writeln!(out, "2. Gear DOWN")?;
        writeln!(out, "3. Inject Hydraulic Fault")?;
        writeln!(out, "4. View Faults")?;
        writeln!(out, "5. Clear Fault")?;
        writeln!(out, "6. Simulate System Reset")?;
        writeln!(out, "q. Quit")?;
        writeln!(out, "{RULE}")?;
        write!(out, "Enter command: ")?;
        out.flush()
    }

    /// Execute one menu choice.
    pub fn handle(&mut self, choice: MenuChoice) -> std::io::Result<MenuFlow> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::GearUp => {
                let outcome = self.machine.command_up();
                self.report_command(outcome)?;
            }
            MenuChoice::GearDown => {
                let outcome = self.machine.command_down();
                self.report_command(outcome)?;
            }
            MenuChoice::InjectFault => {
                self.machine.inject_fault();
                writeln!(self.output, "\n[SYSTEM] Fault injected")?;
            }
            MenuChoice::ViewFaults => {
                let report = self.machine.query_fault();
                match report.diagnostic {
                    Some(diagnostic) if report.active => {
                        writeln!(self.output, "\n[SYSTEM] *** HYDRAULIC FAULT ACTIVE ***")?;
                        writeln!(self.output, "[SYSTEM] {diagnostic}")?;
                    }
                    _ => writeln!(self.output, "\n[SYSTEM] No active faults")?,
                }
            }
            MenuChoice::ClearFault => match self.machine.clear_fault() {
                ClearOutcome::Restored(pos) => {
                    writeln!(self.output, "\n[SYSTEM] Fault cleared - gear restored to {pos}")?
                }
                ClearOutcome::Cleared => writeln!(self.output, "\n[SYSTEM] Fault cleared")?,
                ClearOutcome::NothingToClear => {
                    writeln!(self.output, "\n[SYSTEM] No fault to clear")?
                }
            },
            MenuChoice::Reset => {
                self.machine.reset();
                writeln!(
                    self.output,
                    "\n[SYSTEM] System reset - gear {}",
                    self.machine.position()
                )?;
            }
            MenuChoice::Quit => {
                writeln!(self.output, "\n[SYSTEM] Shutting down")?;
                return Ok(MenuFlow::Quit);
            }
        }
        Ok(MenuFlow::Continue)
    }

    fn report_command(&mut self, outcome: CommandOutcome) -> std::io::Result<()> {
        match outcome {
            CommandOutcome::Completed(s) => writeln!(
                self.output,
                "\n[SYSTEM] Gear {} in {:.1} s (limit {:.1} s)",
                s.direction.as_str(),
                s.elapsed.as_secs_f64(),
                s.limit.as_secs_f64()
            ),
            CommandOutcome::Degraded(s) => writeln!(
                self.output,
                "\n[SYSTEM] Gear {} on backup pump in {:.1} s (limit {:.1} s)",
                s.direction.as_str(),
                s.elapsed.as_secs_f64(),
                s.limit.as_secs_f64()
            ),
            CommandOutcome::Aborted(_) => writeln!(
                self.output,
                "\n[SYSTEM] Retraction aborted - gear held DOWN, maintenance required"
            ),
            CommandOutcome::Inhibited { previous } => writeln!(
                self.output,
                "\n[SYSTEM] Command inhibited by hydraulic fault (gear was {previous}); clear fault to continue"
            ),
            CommandOutcome::Rejected(RejectReason::FaultLatched) => writeln!(
                self.output,
                "\n[SYSTEM] Command rejected - clear the hydraulic fault first"
            ),
            CommandOutcome::Rejected(_) => {
                writeln!(self.output, "\n[SYSTEM] Command rejected")
            }
        }
    }
}
