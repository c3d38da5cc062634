//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs the log subscriber
//! - calls the library
//! - prints tables, JSON or plots

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    AggregateArgs, BlockArgs, Cli, Command, CumulativeArgs, DeltaArgs, ErrorArgs,
    EstimateRateArgs, FitArgs, PlotArgs, RateArgs, SlopeArgs, UnitArgs,
};
use crate::domain::{EvalOptions, Level};
use crate::error::CurveError;
use crate::models::{self, unit};
use crate::plot::{render_ascii_plot, PlotValue};
use crate::vectorized::{self, Operand};
use crate::{compare, fit, math, report, series};

/// Entry point for the `lc` binary.
pub fn run() -> Result<(), CurveError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Slope(args) => handle_slope(args),
        Command::Rate(args) => handle_rate(args),
        Command::EstimateRate(args) => handle_estimate_rate(args),
        Command::Unit(args) => handle_unit(args),
        Command::Cumulative(args) => handle_cumulative(args),
        Command::Block(args) => handle_block(args),
        Command::Delta(args) => handle_delta(args),
        Command::Error(args) => handle_error(args),
        Command::Aggregate(args) => handle_aggregate(args),
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins unless
/// `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn options(na_rm: bool) -> EvalOptions {
    EvalOptions { na_rm }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CurveError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CurveError::Output {
        message: e.to_string(),
    })?;
    println!("{text}");
    Ok(())
}

fn handle_slope(args: SlopeArgs) -> Result<(), CurveError> {
    let slopes = vectorized::natural_slopes(&args.rates, options(args.na_rm))?;
    for b in slopes {
        println!("{b:.6}");
    }
    Ok(())
}

fn handle_rate(args: RateArgs) -> Result<(), CurveError> {
    let rates = vectorized::learning_rates(&args.slopes, options(args.na_rm))?;
    for r in rates {
        println!("{r:.6}");
    }
    Ok(())
}

fn handle_estimate_rate(args: EstimateRateArgs) -> Result<(), CurveError> {
    let b = math::natural_slope_estimate(args.total, args.t, args.n)?;
    println!("natural slope {b:.6}");
    println!("learning rate {:.6}", math::learning_rate(b));
    Ok(())
}

fn handle_unit(args: UnitArgs) -> Result<(), CurveError> {
    info!(model = ?args.model, units = args.n.len(), "evaluating unit costs");
    let t = Operand::from(args.t);
    let m = Operand::from(args.m);
    let n = Operand::from(args.n.clone());
    let r = Operand::from(args.r);

    for &model in args.model.kinds() {
        let costs = vectorized::unit_costs(model, &t, &m, &n, &r, options(args.na_rm))?;
        println!("{}", model.display_name());
        for (unit, cost) in args.n.iter().filter(|v| !args.na_rm || !v.is_nan()).zip(costs) {
            println!("{unit:>10} {cost:>20.6}");
        }
    }
    Ok(())
}

fn handle_cumulative(args: CumulativeArgs) -> Result<(), CurveError> {
    let i = &args.inputs;
    for &model in args.model.kinds() {
        let total = models::block_cost(model, i.t, i.m, i.n, i.r, args.approx)?;
        println!("{:<28} {total:.6}", model.display_name());
    }
    Ok(())
}

fn handle_block(args: BlockArgs) -> Result<(), CurveError> {
    let i = &args.inputs;
    let summary = unit::block_summary(i.t, i.m, i.n, i.r)?;
    if args.json {
        return print_json(&summary);
    }
    print!("{}", report::format_block_summary(&summary));
    Ok(())
}

fn handle_delta(args: DeltaArgs) -> Result<(), CurveError> {
    let i = &args.inputs;
    let values = compare::delta(i.t, i.m, i.n, i.r, args.level)?;
    print!("{}", report::format_indexed(i.m, &values));
    Ok(())
}

fn handle_error(args: ErrorArgs) -> Result<(), CurveError> {
    let gap = compare::prediction_error(args.n, args.r1, args.r2)?;
    println!("{gap}");
    Ok(())
}

fn handle_aggregate(args: AggregateArgs) -> Result<(), CurveError> {
    let curve = fit::aggregate_curve(&args.t, &args.r, args.n, options(args.na_rm))?;
    if args.json {
        return print_json(&curve);
    }
    print!("{}", report::format_aggregate(&curve));
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), CurveError> {
    let fitted = fit::fit_learning_curve(&args.units, &args.costs, options(args.na_rm))?;
    if args.json {
        return print_json(&fitted);
    }
    print!("{}", report::format_fitted_curve(&fitted));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), CurveError> {
    let i = &args.inputs;
    let value = match args.level {
        Level::Unit => PlotValue::Unit,
        Level::Cumulative => PlotValue::Cumulative,
    };

    if args.block {
        let block = series::block_series(i.t, i.m, i.n, i.r)?;
        if args.json {
            return print_json(&block);
        }
        // The midpoint is a per-unit cost; it has no place on a running-total axis.
        let midpoint = (value == PlotValue::Unit).then_some(&block.midpoint);
        let plot = render_ascii_plot(
            std::slice::from_ref(&block.series),
            midpoint,
            value,
            args.width,
            args.height,
        );
        print!("{plot}");
        return Ok(());
    }

    let curves = series::curve_series(i.t, i.m, i.n, i.r, args.model)?;
    if args.json {
        return print_json(&curves);
    }
    let plot = render_ascii_plot(&curves, None, value, args.width, args.height);
    print!("{plot}");
    Ok(())
}
