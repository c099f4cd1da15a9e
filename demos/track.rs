//! Filter a measurement series with the default constant-velocity tracker.
//!
//! ```sh
//! cargo run --example track -- --input meas.txt --output filtered.txt
//! cargo run --example track --features tracing -- --hex --input meas_data.txt \
//!     --q8-output --output filtered_output.txt -v
//! ```
//!
//! Without `--input` a short built-in series is used. Estimates are written
//! one per line, or printed when no `--output` is given. `--q8-output`
//! writes them as Q8.8 counts (value × 256) for comparison against a
//! fixed-point filter.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linkalman::estimate::{ConstantVelocity, CovarianceUpdate, EstimateError};
use linkalman::fixture::{
    read_q8_hex, read_series, to_q8, write_q8_series, write_series, FixtureError,
};
use tracing::{info, warn};

const BUILT_IN: [f64; 5] = [0.0, 1.0, 2.2, 2.9, 4.1];

/// Constant-velocity Kalman tracker demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Measurement file, one value per line.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Read the input as Q8.8 hexadecimal words instead of decimals.
    #[arg(long, default_value_t = false)]
    hex: bool,

    /// Write position estimates here instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write estimates as Q8.8 counts instead of decimals.
    #[arg(long, default_value_t = false)]
    q8_output: bool,

    /// Time step between measurements.
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Process noise variance.
    #[arg(long, default_value_t = 0.1)]
    process_noise: f64,

    /// Measurement noise variance.
    #[arg(long, default_value_t = 4.0)]
    measurement_noise: f64,

    /// Use the Joseph covariance update.
    #[arg(long, default_value_t = false)]
    joseph: bool,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();
}

fn load(args: &Args) -> Result<Vec<f64>, FixtureError> {
    match &args.input {
        Some(path) if args.hex => read_q8_hex(path),
        Some(path) => read_series(path),
        None => Ok(BUILT_IN.to_vec()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let measurements = match load(&args) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(count = measurements.len(), "loaded measurements");

    let settings = ConstantVelocity {
        dt: args.dt,
        process_noise: args.process_noise,
        measurement_noise: args.measurement_noise,
        covariance_update: if args.joseph {
            CovarianceUpdate::Joseph
        } else {
            CovarianceUpdate::Simple
        },
        ..ConstantVelocity::<f64>::default()
    };
    let mut kf = settings.build();

    let mut estimates = Vec::with_capacity(measurements.len());
    for (k, z) in measurements.iter().enumerate() {
        kf.predict();
        match kf.update_scalar(*z) {
            Ok(innovation) => {
                tracing::debug!(k, z, nis = innovation.normalized_squared(), "update");
            }
            Err(EstimateError::SingularInnovation) => {
                warn!(k, z, "singular innovation, measurement skipped");
            }
            Err(e) => {
                tracing::error!(k, "{}", e);
                return ExitCode::FAILURE;
            }
        }
        estimates.push(kf.position());
    }

    info!(
        position = kf.position(),
        velocity = kf.velocity(),
        "final estimate"
    );

    match &args.output {
        Some(path) => {
            let written = if args.q8_output {
                write_q8_series(path, &estimates)
            } else {
                write_series(path, &estimates)
            };
            if let Err(e) = written {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
            info!(path = %path.display(), "wrote estimates");
        }
        None => {
            for x in &estimates {
                if args.q8_output {
                    println!("{}", to_q8(*x) as i16);
                } else {
                    println!("{}", x);
                }
            }
        }
    }

    ExitCode::SUCCESS
}
