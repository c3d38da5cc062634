//! Command-line parsing for the learning-curve calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! model code. Every subcommand maps one-to-one onto a library call.

use clap::{Args, Parser, Subcommand};

use crate::domain::{Level, ModelSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lc", version, about = "Production learning-curve calculator")]
pub struct Cli {
    /// Log computed intermediates (slopes, exponents) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert learning rates to natural slopes.
    Slope(SlopeArgs),
    /// Convert natural slopes to learning rates.
    Rate(RateArgs),
    /// Back out a learning rate from the total cost of the first n units.
    EstimateRate(EstimateRateArgs),
    /// Cost of individual units.
    Unit(UnitArgs),
    /// Total cost of the block [m, n].
    Cumulative(CumulativeArgs),
    /// Block summary with the midpoint unit (unit model).
    Block(BlockArgs),
    /// Unit-model minus cumulative-average-model cost for every unit in [m, n].
    Delta(DeltaArgs),
    /// Relative error from using rate r1 when r2 is correct.
    Error(ErrorArgs),
    /// Fit one equivalent curve to several departments.
    Aggregate(AggregateArgs),
    /// Fit a unit curve to observed unit costs.
    Fit(FitArgs),
    /// Plot unit or cumulative cost over [m, n] in the terminal.
    Plot(PlotArgs),
}

/// The `(t, m, n, r)` inputs of a block formula.
#[derive(Debug, Args, Clone)]
pub struct BlockInputs {
    /// Cost of the reference unit m.
    #[arg(short = 't', long)]
    pub t: f64,

    /// Reference (first) unit of the block.
    #[arg(short = 'm', long, default_value_t = 1.0)]
    pub m: f64,

    /// Last unit of the block.
    #[arg(short = 'n', long)]
    pub n: f64,

    /// Learning rate (e.g. 0.85 for an 85% curve).
    #[arg(short = 'r', long)]
    pub r: f64,
}

#[derive(Debug, Args)]
pub struct SlopeArgs {
    /// Learning rates; `NA` marks a missing value.
    #[arg(required = true, num_args = 1.., value_parser = parse_value)]
    pub rates: Vec<f64>,

    /// Drop missing values instead of propagating them.
    #[arg(long)]
    pub na_rm: bool,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Natural slopes; `NA` marks a missing value.
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true, value_parser = parse_value)]
    pub slopes: Vec<f64>,

    /// Drop missing values instead of propagating them.
    #[arg(long)]
    pub na_rm: bool,
}

#[derive(Debug, Args)]
pub struct EstimateRateArgs {
    /// Total cost of the first n units.
    #[arg(long)]
    pub total: f64,

    /// Cost of unit 1.
    #[arg(short = 't', long)]
    pub t: f64,

    /// Number of units produced.
    #[arg(short = 'n', long)]
    pub n: f64,
}

#[derive(Debug, Args)]
pub struct UnitArgs {
    /// Cost of the reference unit m.
    #[arg(short = 't', long)]
    pub t: f64,

    /// Reference unit.
    #[arg(short = 'm', long, default_value_t = 1.0)]
    pub m: f64,

    /// Units to evaluate; `NA` marks a missing value.
    #[arg(short = 'n', long, required = true, num_args = 1.., value_parser = parse_value)]
    pub n: Vec<f64>,

    /// Learning rate.
    #[arg(short = 'r', long)]
    pub r: f64,

    /// Which model(s) to evaluate.
    #[arg(long, value_enum, default_value_t = ModelSpec::Unit)]
    pub model: ModelSpec,

    /// Drop missing values instead of propagating them.
    #[arg(long)]
    pub na_rm: bool,
}

#[derive(Debug, Args)]
pub struct CumulativeArgs {
    #[command(flatten)]
    pub inputs: BlockInputs,

    /// Which model(s) to evaluate.
    #[arg(long, value_enum, default_value_t = ModelSpec::Unit)]
    pub model: ModelSpec,

    /// Use the constant-time integral approximation for the unit model.
    #[arg(long)]
    pub approx: bool,
}

#[derive(Debug, Args)]
pub struct BlockArgs {
    #[command(flatten)]
    pub inputs: BlockInputs,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DeltaArgs {
    #[command(flatten)]
    pub inputs: BlockInputs,

    /// Report per-unit differences or their running total.
    #[arg(long, value_enum, default_value_t = Level::Unit)]
    pub level: Level,
}

#[derive(Debug, Args)]
pub struct ErrorArgs {
    /// Unit whose predicted cost is compared.
    #[arg(short = 'n', long)]
    pub n: f64,

    /// Assumed learning rate.
    #[arg(long)]
    pub r1: f64,

    /// Correct learning rate.
    #[arg(long)]
    pub r2: f64,
}

#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// First-unit cost per department (comma separated).
    #[arg(short = 't', long, required = true, value_delimiter = ',', value_parser = parse_value)]
    pub t: Vec<f64>,

    /// Learning rate per department (comma separated).
    #[arg(short = 'r', long, required = true, value_delimiter = ',', value_parser = parse_value)]
    pub r: Vec<f64>,

    /// Shared production horizon.
    #[arg(short = 'n', long)]
    pub n: f64,

    /// Drop departments with a missing cost or rate.
    #[arg(long)]
    pub na_rm: bool,

    /// Print the fit as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct FitArgs {
    /// Observed unit indices (comma separated).
    #[arg(long, required = true, value_delimiter = ',', value_parser = parse_value)]
    pub units: Vec<f64>,

    /// Observed unit costs (comma separated).
    #[arg(long, required = true, value_delimiter = ',', value_parser = parse_value)]
    pub costs: Vec<f64>,

    /// Drop observations with a missing unit or cost.
    #[arg(long)]
    pub na_rm: bool,

    /// Print the fit as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub inputs: BlockInputs,

    /// Which model(s) to plot.
    #[arg(long, value_enum, default_value_t = ModelSpec::Both)]
    pub model: ModelSpec,

    /// Plot unit cost or running total.
    #[arg(long, value_enum, default_value_t = Level::Unit)]
    pub level: Level,

    /// Annotate the block midpoint (unit model only).
    #[arg(long)]
    pub block: bool,

    /// Emit the series records as JSON instead of drawing.
    #[arg(long)]
    pub json: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Parse a number, accepting `NA` / `NaN` as a missing value.
pub fn parse_value(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|e| format!("'{s}' is not a number: {e}"))
}
