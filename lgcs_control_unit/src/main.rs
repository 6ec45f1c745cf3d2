//! # LGCS Control Unit
//!
//! Interactive landing gear controller. Loads `config/lgcs.toml` (or the
//! built-in defaults), opens the event log and runs the operator menu on
//! stdin/stdout until `q`, end of input or Ctrl-C.

use clap::Parser;
use lgcs_common::config::{ConfigLoader, LgcsConfig, LogLevel};
use lgcs_common::consts::DEFAULT_CONFIG_PATH;
use lgcs_common::gear::config::FaultPolicy;
use lgcs_common::gear::event::Fanout;
use lgcs_common::gear::fault::HydraulicFaultLine;
use lgcs_common::gear::state::GearPosition;
use lgcs_control_unit::GearStateMachine;
use lgcs_control_unit::clock::ThreadClock;
use lgcs_control_unit::config::{ConfigSource, Overrides, render_config, resolve_config};
use lgcs_control_unit::error::LgcsError;
use lgcs_control_unit::shell::log_sink::{LogFileSink, TracingSink};
use lgcs_control_unit::shell::menu::Menu;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// LGCS Control Unit - landing gear sequencing with hydraulic fault handling
#[derive(Parser, Debug)]
#[command(name = "lgcs_control_unit")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Landing gear control system with hydraulic fault handling")]
struct Args {
    /// Path to the configuration TOML. Missing file means built-in defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Initial gear position (up_locked | down_locked).
    #[arg(long, value_parser = parse_initial)]
    initial: Option<GearPosition>,

    /// Fault policy (degraded | immediate_gate).
    #[arg(long)]
    policy: Option<FaultPolicy>,

    /// Multiplier on modeled transition time (0 = no sleeping).
    #[arg(long, value_name = "FACTOR")]
    time_scale: Option<f64>,

    /// Event log file (truncated at startup).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Write the event log as JSON lines.
    #[arg(long)]
    json_events: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn parse_initial(s: &str) -> Result<GearPosition, String> {
    match s {
        "up_locked" | "up" => Ok(GearPosition::UpLocked),
        "down_locked" | "down" => Ok(GearPosition::DownLocked),
        other => Err(format!(
            "invalid initial position '{other}' (expected up_locked or down_locked)"
        )),
    }
}

fn main() {
    let args = Args::parse();
    // Peek at [shared].log_level before anything else logs.
    let file_level = LgcsConfig::load(&args.config)
        .ok()
        .map(|config| config.shared.log_level);
    setup_tracing(&args, file_level);

    info!("LGCS Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("LGCS Control Unit shutdown complete");
}

fn run(args: &Args) -> Result<(), LgcsError> {
    let overrides = Overrides {
        initial_position: args.initial,
        fault_policy: args.policy,
        time_scale: args.time_scale,
        log_file: args.log_file.clone(),
        json_events: args.json_events,
    };
    let (config, source) = resolve_config(&args.config, &overrides)?;
    match source {
        ConfigSource::File(ref path) => info!(
            "Service {}: loaded config from {}",
            config.shared.service_name,
            path.display()
        ),
        ConfigSource::Defaults => {
            info!("Service {}: built-in defaults", config.shared.service_name)
        }
    }

    if args.print_config {
        println!("{}", render_config(&config)?);
        return Ok(());
    }

    // Console echo comes from the log sink; tracing copies only in verbose mode.
    let mut sinks = Fanout::new().with(LogFileSink::create(&config.log)?);
    if args.verbose {
        sinks = sinks.with(TracingSink);
    }

    let fault_line = HydraulicFaultLine::new();
    let clock = ThreadClock::new(config.gear.time_scale);
    info!("Pacing clock: time_scale={}", clock.time_scale());
    let mut machine = GearStateMachine::new(config.gear.clone(), fault_line, clock, sinks)?;
    info!(
        "Gear machine ready: position={}, policy={}, down={}s, up={}s",
        machine.position(),
        machine.policy().as_str(),
        machine.config().gear_down_time_s,
        machine.config().gear_up_time_s,
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(&mut machine, stdin.lock(), stdout.lock());

    // Setup signal handler for graceful shutdown.
    let running = menu.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    menu.run()?;
    Ok(())
}

fn setup_tracing(args: &Args, file_level: Option<LogLevel>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        file_level.map_or(Level::INFO, Level::from)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
