use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use smd::config::{load_config, MotorConfig, DEFAULT_CONFIG_PATH};
use smd::pins::parse_list;
use smd::planner::degrees_from_f64;
use smd::server::run_websocket_server;
use smd::{Direction, Driver, Heading, MoveReport};

#[derive(Parser)]
struct Cli {
    /// Motor configuration, `motor.json` when present
    #[clap(long)]
    config: Option<PathBuf>,
    /// Comma separated coil pins IN1..IN4, overrides the configuration
    #[clap(long)]
    pins: Option<String>,
    #[clap(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Rotate {
        #[clap(allow_hyphen_values = true)]
        degrees: f64,
        /// 1 clockwise, -1 counter-clockwise
        #[clap(long, default_value = "1", allow_hyphen_values = true)]
        direction: i64,
        #[clap(long)]
        speed: Option<u32>,
    },
    TurnTo {
        #[clap(allow_hyphen_values = true)]
        degrees: f64,
        /// 1 clockwise, -1 counter-clockwise, 0 shortest arc
        #[clap(long, default_value = "0", allow_hyphen_values = true)]
        direction: i64,
        #[clap(long)]
        speed: Option<u32>,
    },
    Demo,
    Server {
        #[clap(default_value = msg::DEFAULT_SERVER_PORT)]
        port: u16,
    },
}

fn load(cli: &Cli) -> Result<MotorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let path = std::path::Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_config(path)?
            } else {
                MotorConfig::default()
            }
        }
    };
    if let Some(list) = &cli.pins {
        config.pins = parse_list(list)?;
    }
    return Ok(config);
}

fn print_report(report: &MoveReport) {
    println!(
        "pulses: {}\tdirection: {:?}\tspeed: {}",
        report.pulses, report.direction, report.speed
    );
    println!("angle: {}\tphase: {}", report.angle, report.phase);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let config = load(&args)?;
    let mut driver = Driver::from_config(&config)?;
    info!("Initialized {}", driver.actuator_name());

    match args.cmd {
        Commands::Rotate {
            degrees,
            direction,
            speed,
        } => {
            let degrees = degrees_from_f64(degrees)?;
            let report = driver.rotate(degrees, Direction::from_sign(direction), speed)?;
            print_report(&report);
        }
        Commands::TurnTo {
            degrees,
            direction,
            speed,
        } => {
            let degrees = degrees_from_f64(degrees)?;
            let report = driver.turn_to(degrees, Heading::from_sign(direction), speed)?;
            print_report(&report);
        }
        Commands::Demo => {
            for _ in 0..9 {
                print_report(&driver.rotate(25, Direction::Clockwise, None)?);
            }
            for target in [333, 355, 350, 359] {
                println!("=========================");
                let report =
                    driver.turn_to(target, Heading::Fixed(Direction::Clockwise), None)?;
                print_report(&report);
            }
        }
        Commands::Server { port } => {
            run_websocket_server(port, &mut driver)?;
        }
    }

    Ok(())
}
