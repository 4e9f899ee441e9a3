//! CLI demo of gradient descent on a random separable polynomial surface.
//!
//! Draws p(x) and q(y), runs fixed-step descent on f(x, y) = p(x) + q(y),
//! prints the path, checks the analytic gradient against finite differences
//! and optionally writes the sampled surface plus path as JSON for a plotter.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gd_core::{finite_diff_grad, max_grad_error, Bound, CoefficientScheme, GridResolution, SeparableSum};
use gd_descent::{DemoConfig, Scene};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Finite-difference step for the start-point gradient check.
const FD_EPS: f64 = 1e-6;

/// Gradient descent on f(x, y) = p(x) + q(y) for random polynomials p and q.
#[derive(Parser, Debug)]
#[command(name = "gd", version, about)]
struct Args {
    /// JSON config file; the flags below override its fields
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the random source
    #[arg(long)]
    seed: Option<u64>,

    /// Degree of both polynomials
    #[arg(long)]
    degree: Option<usize>,

    /// Domain bounds; both integers or both floats (e.g. `-2 2` or `-2.5 2.5`)
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true, value_parser = parse_bound)]
    domain: Option<Vec<Bound>>,

    /// Gradient weight per step
    #[arg(long)]
    rate: Option<f64>,

    /// Number of descent steps
    #[arg(long)]
    steps: Option<usize>,

    /// Grid samples per domain unit
    #[arg(long, conflicts_with = "samples")]
    values_per_unit: Option<usize>,

    /// Fixed number of grid samples per axis
    #[arg(long)]
    samples: Option<usize>,

    /// Draw integer coefficients uniformly from [LOW, HIGH)
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    integer_coefficients: Option<Vec<i64>>,

    /// Write the scene as JSON to this file (`-` for stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors and skip the text summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    /// Overwrite the config fields given on the command line.
    fn apply(&self, config: &mut DemoConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(degree) = self.degree {
            config.degree_x = degree;
            config.degree_y = degree;
        }
        if let Some(domain) = &self.domain {
            config.domain = domain.clone();
        }
        if let Some(rate) = self.rate {
            config.learning_rate = rate;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(values_per_unit) = self.values_per_unit {
            config.resolution = GridResolution::PerUnit { values_per_unit };
        }
        if let Some(samples) = self.samples {
            config.resolution = GridResolution::Fixed { samples };
        }
        if let Some(range) = &self.integer_coefficients {
            config.coefficients = CoefficientScheme::Integer {
                low: range[0],
                high: range[1],
            };
        }
    }

    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn writes_scene_to_stdout(&self) -> bool {
        self.output.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }
}

/// Integers stay integers so mixed bounds can be rejected later.
fn parse_bound(s: &str) -> Result<Bound, String> {
    if let Ok(v) = s.parse::<i64>() {
        return Ok(Bound::Int(v));
    }
    s.parse::<f64>()
        .map(Bound::Float)
        .map_err(|_| format!("`{}` is not a number", s))
}

fn print_summary(scene: &Scene, config: &DemoConfig) {
    println!("=== Gradient Descent on p(x) + q(y) ===\n");
    println!("p(x) = {:.4}", scene.poly_x);
    println!("q(y) = {:.4}", scene.poly_y);
    println!(
        "Domain: [{}, {}], learning rate: {}, steps: {}\n",
        scene.domain.low(),
        scene.domain.high(),
        config.learning_rate,
        config.steps
    );

    println!("Descent path:");
    for (i, p) in scene.path.iter().enumerate() {
        println!("  step {:3}: x = {:+.6}, y = {:+.6}, z = {:+.6}", i, p.x, p.y, p.z);
    }

    let (rows, cols) = scene.surface.dimensions();
    if let Some(min) = scene.sampled_minimum() {
        println!(
            "\nSampled minimum on {}x{} grid: x = {:+.4}, y = {:+.4}, z = {:+.6}",
            cols, rows, min.x, min.y, min.z
        );
    }
}

/// Compare the power-rule gradient with central differences at the start point.
fn check_start_gradient(scene: &Scene) -> Option<f64> {
    let start = scene.path.start()?;
    let f = SeparableSum::new(scene.poly_x.clone(), scene.poly_y.clone());

    let analytic = f.gradient(start.x, start.y);
    let numeric = finite_diff_grad(|v: &[f64]| f.value(v[0], v[1]), &[start.x, start.y], FD_EPS);
    let err = max_grad_error(&analytic, &numeric);

    let scale = 1.0 + analytic[0].abs().max(analytic[1].abs());
    if err > 1e-5 * scale {
        warn!(err, ?analytic, ?numeric, "analytic gradient disagrees with finite differences");
    } else {
        info!(err, "gradient check passed");
    }
    Some(err)
}

fn write_scene(scene: &Scene, output: &Path) -> Result<()> {
    if !scene.path.is_finite() {
        warn!("descent path diverged; non-finite values are written as null");
    }
    let json = scene.to_json().context("failed to serialize scene")?;
    if output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).context("failed to write scene to stdout")?;
    } else {
        fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
        info!(path = %output.display(), "scene written");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let mut config = match &args.config {
        Some(path) => DemoConfig::from_json_file(path)?,
        None => DemoConfig::default(),
    };
    args.apply(&mut config);

    let mut rng = config.rng();
    let scene = Scene::build(&config, &mut rng)?;

    let show_summary = !args.quiet && !args.writes_scene_to_stdout();
    if show_summary {
        print_summary(&scene, &config);
    }

    if let Some(err) = check_start_gradient(&scene) {
        if show_summary {
            println!("Gradient check at start: max |analytic - fd| = {:.2e}", err);
        }
    }

    if let Some(output) = &args.output {
        write_scene(&scene, output)?;
    }

    Ok(())
}
