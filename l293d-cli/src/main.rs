//! l293d command-line motor control
//!
//! Loads the motor layout from a TOML file, builds one motor per entry and
//! runs a single command against one of them. GPIO is released before the
//! process exits, whether or not the command succeeded.

mod backend;
mod config;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use l293d_core::traits::MotorDriver;
use l293d_core::Direction;
use l293d_drivers::{ControllerSettings, L293dMotor, MotorController};
use log::{info, warn};

use crate::backend::Backend;
use crate::config::{load_config, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "l293d", about = "Drive DC motors through an L293D H-bridge")]
struct Cli {
    /// Motor layout file
    #[arg(long, short, default_value = "l293d.toml")]
    config: PathBuf,
    /// Use the simulated backend instead of real GPIO
    #[arg(long)]
    simulate: bool,
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spin a motor
    Spin {
        motor: String,
        #[arg(value_enum)]
        direction: SpinArg,
        /// Stop after this many seconds
        #[arg(long, value_parser = parse_secs)]
        duration: Option<Duration>,
        /// Return before the timed stop runs
        #[arg(long, requires = "duration")]
        no_wait: bool,
    },
    /// Stop a motor
    Stop {
        motor: String,
        /// Wait this many seconds first
        #[arg(long, value_parser = parse_secs, default_value = "0")]
        after: Duration,
    },
    /// Validate the config and reserve every motor's pins
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SpinArg {
    Cw,
    Ccw,
}

impl From<SpinArg> for Direction {
    fn from(arg: SpinArg) -> Self {
        match arg {
            SpinArg::Cw => Direction::Clockwise,
            SpinArg::Ccw => Direction::Anticlockwise,
        }
    }
}

fn parse_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{}", e))
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

type Motors = BTreeMap<String, L293dMotor<Backend>>;

fn find<'a>(motors: &'a Motors, name: &str) -> Result<&'a L293dMotor<Backend>, ConfigError> {
    motors
        .get(name)
        .ok_or_else(|| ConfigError::UnknownMotor(name.to_string()))
}

fn run(command: &Command, motors: &Motors, test_mode: bool) -> Result<()> {
    match command {
        Command::Spin {
            motor,
            direction,
            duration,
            no_wait,
        } => {
            let pending = find(motors, motor)?.drive((*direction).into(), *duration, !no_wait)?;
            if let Some(stop) = pending {
                // Exiting now would release the pins before the stop runs
                info!("motor {} running, waiting for scheduled stop", motor);
                stop.join()?;
            }
        }
        Command::Stop { motor, after } => {
            find(motors, motor)?.stop(*after)?;
        }
        Command::Check => {
            for (name, motor) in motors {
                println!("{:<16} pins {}", name, motor.pins());
            }
            println!(
                "{} motor(s) ok{}",
                motors.len(),
                if test_mode { " (test mode)" } else { "" }
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let controller_config = file.controller()?;

    let opened = Backend::open(&file.backend, cli.simulate);
    let settings = ControllerSettings {
        test_mode: controller_config.test_mode || opened.test_mode,
    };
    let mut controller = MotorController::with_settings(opened.backend, settings);

    let result = controller
        .motors_from_config(&controller_config.motors)
        .context("building motors")
        .and_then(|motors| run(&cli.command, &motors, settings.test_mode));

    if let Err(e) = controller.cleanup() {
        warn!("GPIO cleanup failed: {}", e);
    }
    result
}
