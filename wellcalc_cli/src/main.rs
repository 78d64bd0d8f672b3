//! # WellCalc CLI
//!
//! Command-line front end for the well-completion calculation engine.
//! Numbers are taken as raw text and parsed by the engine, so malformed
//! input is reported the same way a form front end would report it.
//!
//! ```text
//! wellcalc inflow --name W-1 --ko 50 --h 30 --pr 3000 --pw 2500 \
//!     --uo 2 --bo 1.2 --re 1000 --rw 0.5 --length 10 --area 5 --rd 3 --kd 10
//! wellcalc --json perforation --k 100 --rw 0.25 --lp 12 --rp 0.2 --phasing 0 --h 20 --rd 2
//! wellcalc batch wells.json --remove W-2 --metric design_skin
//! ```

mod batch;
mod report;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wellcalc_core::calculations::ipr::pressure_samples;
use wellcalc_core::equations::{generate_equations_markdown, EquationTracker, ALL_EQUATIONS};
use wellcalc_core::{
    CalculationKind, IprPoint, RankedRecord, RankingMetric, RawFields, RecordPayload,
    ReservoirCalculator, WellRegistry,
};

use batch::{Failure, Submission};
use settings::{CliError, CliSettings};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellcalc")]
#[command(about = "Well-completion calculations: inflow, skin, productivity and perforation design")]
#[command(version)]
struct Cli {
    /// Print results (and errors) as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file (precision, ipr_samples, ranking_metric)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radial inflow, skin, pressure drop and flow efficiency for one well
    #[command(allow_negative_numbers = true)]
    Inflow(InflowArgs),

    /// Productivity/injectivity indices and the Vogel IPR curve
    #[command(allow_negative_numbers = true)]
    Productivity(ProductivityArgs),

    /// Perforation skin design
    #[command(allow_negative_numbers = true)]
    Perforation(PerforationArgs),

    /// Evaluate a JSON file of named submissions and rank them
    Batch(BatchArgs),

    /// Print the equation reference
    Equations,
}

#[derive(Args, Debug)]
struct InflowArgs {
    /// Well name used in the output
    #[arg(long, default_value = "well")]
    name: String,
    /// Formation permeability ko (md)
    #[arg(long)]
    ko: String,
    /// Net pay thickness h (ft)
    #[arg(long)]
    h: String,
    /// Reservoir pressure pr (psi)
    #[arg(long)]
    pr: String,
    /// Flowing bottomhole pressure pw (psi)
    #[arg(long)]
    pw: String,
    /// Oil viscosity uo (cp)
    #[arg(long)]
    uo: String,
    /// Formation-volume factor Bo (bbl/STB)
    #[arg(long)]
    bo: String,
    /// Drainage radius re (ft)
    #[arg(long)]
    re: String,
    /// Wellbore radius rw (ft)
    #[arg(long)]
    rw: String,
    /// Section length L (ft)
    #[arg(long)]
    length: String,
    /// Section area A (ft²)
    #[arg(long)]
    area: String,
    /// Damaged-zone radius rd (ft)
    #[arg(long)]
    rd: String,
    /// Damaged-zone permeability kd (md)
    #[arg(long)]
    kd: String,
}

#[derive(Args, Debug)]
struct ProductivityArgs {
    #[arg(long, default_value = "well")]
    name: String,
    /// Test rate q1 (bbl/day)
    #[arg(long)]
    q1: String,
    /// Bubble-point pressure psat (psi)
    #[arg(long)]
    psat: String,
    /// Static reservoir pressure Pe (psi)
    #[arg(long)]
    pe: String,
    /// Flowing pressure at the test rate pwf (psi)
    #[arg(long)]
    pwf: String,
    #[arg(long)]
    ko: Option<String>,
    #[arg(long)]
    h: Option<String>,
    #[arg(long)]
    pr: Option<String>,
    #[arg(long)]
    pw: Option<String>,
    #[arg(long)]
    uo: Option<String>,
    #[arg(long)]
    bo: Option<String>,
    #[arg(long)]
    re: Option<String>,
    #[arg(long)]
    rw: Option<String>,
}

#[derive(Args, Debug)]
struct PerforationArgs {
    #[arg(long, default_value = "design")]
    name: String,
    /// Formation permeability k (md)
    #[arg(long)]
    k: String,
    /// Wellbore radius rw (ft)
    #[arg(long)]
    rw: String,
    /// Perforation length lp (ft)
    #[arg(long)]
    lp: String,
    /// Perforation radius rp (ft)
    #[arg(long)]
    rp: String,
    /// Phasing angle: 0 or 180 (degrees)
    #[arg(long)]
    phasing: String,
    /// Perforated height h (ft)
    #[arg(long)]
    h: String,
    /// Crushed-zone radius rd (ft)
    #[arg(long)]
    rd: String,
    /// Horizontal permeability (default 1)
    #[arg(long)]
    kh: Option<String>,
    /// Vertical permeability (default 1)
    #[arg(long)]
    kv: Option<String>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON array of { name, kind, fields } submissions
    file: PathBuf,
    /// Remove every record with this name before ranking (repeatable)
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,
    /// Ranking metric (e.g. inflow_rate, qmax, design_skin)
    #[arg(long)]
    metric: Option<String>,
}

fn fields_from(required: &[(&str, &String)], optional: &[(&str, &Option<String>)]) -> RawFields {
    let mut fields = RawFields::from_pairs(required.iter().map(|&(k, v)| (k, v.as_str())));
    for &(key, value) in optional {
        if let Some(value) = value {
            fields.insert(key, value.as_str());
        }
    }
    fields
}

impl InflowArgs {
    fn submission(&self) -> Submission {
        let fields = fields_from(
            &[
                ("ko", &self.ko),
                ("h", &self.h),
                ("pr", &self.pr),
                ("pw", &self.pw),
                ("uo", &self.uo),
                ("bo", &self.bo),
                ("re", &self.re),
                ("rw", &self.rw),
                ("length", &self.length),
                ("area", &self.area),
                ("rd", &self.rd),
                ("kd", &self.kd),
            ],
            &[],
        );
        Submission {
            name: self.name.clone(),
            kind: CalculationKind::Inflow,
            fields,
        }
    }
}

impl ProductivityArgs {
    fn submission(&self) -> Submission {
        let fields = fields_from(
            &[
                ("q1", &self.q1),
                ("psat", &self.psat),
                ("pe", &self.pe),
                ("pwf", &self.pwf),
            ],
            &[
                ("ko", &self.ko),
                ("h", &self.h),
                ("pr", &self.pr),
                ("pw", &self.pw),
                ("uo", &self.uo),
                ("bo", &self.bo),
                ("re", &self.re),
                ("rw", &self.rw),
            ],
        );
        Submission {
            name: self.name.clone(),
            kind: CalculationKind::Productivity,
            fields,
        }
    }
}

impl PerforationArgs {
    fn submission(&self) -> Submission {
        let fields = fields_from(
            &[
                ("k", &self.k),
                ("rw", &self.rw),
                ("lp", &self.lp),
                ("rp", &self.rp),
                ("phasing", &self.phasing),
                ("h", &self.h),
                ("rd", &self.rd),
            ],
            &[("kh", &self.kh), ("kv", &self.kv)],
        );
        Submission {
            name: self.name.clone(),
            kind: CalculationKind::Perforation,
            fields,
        }
    }
}

// ============================================================================
// JSON Reports
// ============================================================================

#[derive(Serialize)]
struct SingleReport<'a> {
    name: &'a str,
    #[serde(flatten)]
    payload: &'a RecordPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipr_curve: Option<&'a [IprPoint]>,
    equations: &'a EquationTracker,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    metric: RankingMetric,
    removed: usize,
    ranking: &'a [RankedRecord],
    failures: &'a [Failure],
    registry: &'a WellRegistry,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(wellcalc_core::CalcError::from)?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn run_single(submission: &Submission, json: bool, settings: &CliSettings) -> Result<(), CliError> {
    let payload = batch::evaluate(submission)?;

    let mut tracker = EquationTracker::new();
    for equation in submission.kind.equations() {
        tracker.record_for_well(equation, submission.kind.display_name(), submission.name.as_str());
    }

    let curve: Option<Vec<IprPoint>> = match &payload {
        RecordPayload::Productivity { inputs, pe, pwf, .. } => {
            let pressures = pressure_samples(inputs.psat, settings.ipr_samples);
            let points = ReservoirCalculator::new(*inputs)
                .ipr_curve(*pe, *pwf, &pressures)?
                .collect();
            tracker.record_for_well(
                wellcalc_core::equations::Equation::VogelInflowCurve,
                "IPR curve",
                submission.name.as_str(),
            );
            Some(points)
        }
        _ => None,
    };

    if json {
        return print_json(&SingleReport {
            name: &submission.name,
            payload: &payload,
            ipr_curve: curve.as_deref(),
            equations: &tracker,
        });
    }

    print!("{}", report::payload(&submission.name, &payload, settings.precision));
    if let Some(points) = &curve {
        println!();
        print!("{}", report::ipr_curve(points, settings.precision));
    }
    println!();
    print!("{}", report::references(&tracker));
    Ok(())
}

fn run_batch(args: &BatchArgs, json: bool, settings: &CliSettings) -> Result<(), CliError> {
    let metric = match &args.metric {
        Some(name) => name.parse::<RankingMetric>()?,
        None => settings.ranking_metric,
    };

    let text = read_file(&args.file)?;
    let submissions = batch::parse_submissions(&text)?;
    info!(count = submissions.len(), file = %args.file.display(), "batch loaded");

    let mut outcome = batch::run(&submissions);
    let removed: usize = args
        .remove
        .iter()
        .map(|name| outcome.registry.remove_by_name(name))
        .sum();
    let ranking = outcome.registry.ranking(metric);

    if json {
        return print_json(&BatchReport {
            metric,
            removed,
            ranking: &ranking,
            failures: &outcome.failures,
            registry: &outcome.registry,
        });
    }

    for failure in &outcome.failures {
        println!("skipped {}: {}", failure.name, failure.error);
    }
    if removed > 0 {
        println!("removed {} record(s)", removed);
    }
    print!("{}", report::ranking(metric, &ranking, settings.precision));
    println!();
    print!("{}", report::references(&outcome.tracker));
    Ok(())
}

fn run_equations(json: bool) -> Result<(), CliError> {
    if !json {
        print!("{}", generate_equations_markdown());
        return Ok(());
    }
    let listing: Vec<_> = ALL_EQUATIONS
        .iter()
        .map(|eq| {
            let meta = eq.metadata();
            serde_json::json!({
                "equation": eq,
                "name": meta.name,
                "formula": meta.formula_plain,
                "category": meta.category.display_name(),
                "reference": meta.reference.citation(),
            })
        })
        .collect();
    print_json(&listing)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = CliSettings::load(cli.config.as_deref())?;
    debug!(?settings, "running {:?}", cli.command);

    match &cli.command {
        Command::Inflow(args) => run_single(&args.submission(), cli.json, &settings),
        Command::Productivity(args) => run_single(&args.submission(), cli.json, &settings),
        Command::Perforation(args) => run_single(&args.submission(), cli.json, &settings),
        Command::Batch(args) => run_batch(args, cli.json, &settings),
        Command::Equations => run_equations(cli.json),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if cli.json {
                println!("{}", err.to_json());
            }
            ExitCode::from(1)
        }
    }
}
