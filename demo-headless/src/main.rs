mod graph;

use clap::Parser;
use graph::render_duty_graph;
use sprayer_core::{
    ApplicationRate, Boom, BoomConfig, Distance, FlowRate, Pressure, Scenario, ScenarioOutcome,
    Speed, SprayError, YawRate,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sprayer boom rate compensation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "sprayer-demo")]
#[command(about = "PWM boom sprayer turn compensation demo", long_about = None)]
struct Args {
    /// Unit system (imperial, metric)
    #[arg(short, long, default_value = "imperial")]
    units: String,

    /// Number of nozzles on the boom
    #[arg(short, long, default_value_t = 72)]
    nozzles: usize,

    /// Nozzle spacing in ft or m [default: 20" or 0.5 m]
    #[arg(long)]
    spacing: Option<f64>,

    /// Tip flow at base pressure in gpm or l/min [default: 06 tip]
    #[arg(long, value_parser = non_negative)]
    nozzle_flow: Option<f64>,

    /// Spray mix density relative to water
    #[arg(long, default_value_t = 1.0)]
    specific_gravity: f64,

    /// Supply pressure in psi or bar [default: 50 psi or 3.45 bar]
    #[arg(short, long, value_parser = non_negative)]
    pressure: Option<f64>,

    /// Application rate in gal/acre or l/ha [default: 10 gal/acre or 94 l/ha]
    #[arg(short, long, value_parser = non_negative)]
    rate: Option<f64>,

    /// Single command: travel speed in mph or km/h (runs the demonstration otherwise)
    #[arg(short, long, requires = "yaw", value_parser = non_negative)]
    speed: Option<f64>,

    /// Single command: yaw rate in deg/s, positive turning right
    #[arg(short, long, requires = "speed", allow_hyphen_values = true)]
    yaw: Option<f64>,
}

/// Physical quantities the unit constructors refuse to go below zero
fn non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("must be a non-negative number, got {}", value))
    }
}

/// Display labels and default command for one unit system
struct Labels {
    distance: &'static str,
    speed: &'static str,
    pressure: &'static str,
    flow: &'static str,
    rate: &'static str,
    default_pressure: f64,
    default_rate: f64,
}

const IMPERIAL_LABELS: Labels = Labels {
    distance: "ft",
    speed: "mph",
    pressure: "psi",
    flow: "gpm",
    rate: "gal/acre",
    default_pressure: 50.0,
    default_rate: 10.0,
};

const METRIC_LABELS: Labels = Labels {
    distance: "m",
    speed: "km/h",
    pressure: "bar",
    flow: "l/min",
    rate: "l/ha",
    default_pressure: 3.45,
    default_rate: 94.0,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SprayError> {
    println!("=== Sprayer Boom Rate Compensation Demo ===\n");

    // Pick preset from unit system
    let (preset, labels) = match args.units.to_lowercase().as_str() {
        "metric" | "si" => (BoomConfig::metric_36m(), &METRIC_LABELS),
        "imperial" | "us" => (BoomConfig::imperial_120ft(), &IMPERIAL_LABELS),
        other => {
            println!("Unknown unit system '{}', using imperial", other);
            (BoomConfig::imperial_120ft(), &IMPERIAL_LABELS)
        }
    };

    let config = BoomConfig {
        nozzle_count: args.nozzles,
        spacing: args.spacing.map_or(preset.spacing, Distance::new),
        nominal_flow: args.nozzle_flow.map_or(preset.nominal_flow, FlowRate::new),
        specific_gravity: args.specific_gravity,
        ..preset
    };
    let mut boom = Boom::from_config(&config)?;

    let pressure = Pressure::new(args.pressure.unwrap_or(labels.default_pressure));
    let rate = ApplicationRate::new(args.rate.unwrap_or(labels.default_rate));

    println!(
        "Boom: {} nozzles on {:.3} {} spacing ({:.1} {} wide)",
        boom.nozzle_count(),
        boom.spacing().value(),
        labels.distance,
        boom.width().value(),
        labels.distance
    );
    println!(
        "Nozzle capacity: {} {} at {} {}",
        boom.capacity(pressure),
        labels.flow,
        pressure,
        labels.pressure
    );
    println!("Target rate: {} {}\n", rate, labels.rate);

    let scenario = match (args.speed, args.yaw) {
        (Some(speed), Some(yaw)) => {
            Scenario::single(rate, pressure, Speed::new(speed), YawRate::new(yaw))
        }
        _ => Scenario {
            rate,
            pressure,
            ..Scenario::demonstration()
        },
    };

    for outcome in scenario.run(&mut boom)? {
        print_outcome(&outcome, labels);
    }

    println!("=== Demo Complete ===");
    Ok(())
}

fn print_outcome(outcome: &ScenarioOutcome, labels: &Labels) {
    let report = &outcome.report;

    println!(
        "--- Speed {} {}, yaw {} deg/s ---",
        outcome.speed, labels.speed, outcome.yaw_rate
    );
    println!("Baseline duty cycle: {:.1}%", report.baseline.to_percent());
    println!("Total flow: {} {}", report.total_flow(), labels.flow);
    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }
    println!();
    print!("{}", render_duty_graph(report.baseline, &report.values.ratios()));
    println!();
}
