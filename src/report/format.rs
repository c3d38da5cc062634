//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{AggregateCurve, BlockSummary, CurveSeries, FittedCurve, Level};

/// Format a block summary as aligned key/value lines.
pub fn format_block_summary(summary: &BlockSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:.0}\n", "block_units", summary.block_units));
    out.push_str(&format!("{:<16} {:.4}\n", "block_hours", summary.block_hours));
    out.push_str(&format!("{:<16} {:.4}\n", "midpoint_unit", summary.midpoint_unit));
    out.push_str(&format!("{:<16} {:.4}\n", "midpoint_hours", summary.midpoint_hours));
    out
}

/// Format an aggregate curve fit with its per-department totals.
pub fn format_aggregate(fit: &AggregateCurve) -> String {
    let mut out = String::new();
    out.push_str(&format!("Aggregate curve at n = {}\n", fit.horizon));
    for (i, hours) in fit.department_hours.iter().enumerate() {
        out.push_str(&format!("  department {:<3} {hours:>14.4}\n", i + 1));
    }
    out.push_str(&format!("  {:<14} {:>14.4}\n", "first units", fit.first_unit_total));
    out.push_str(&format!("  {:<14} {:>14.6}\n", "exponent B", fit.exponent));
    out.push_str(&format!("  {:<14} {:>14.6}\n", "learning rate", fit.learning_rate));
    out.push_str(&format!("  {:<14} {:>14.4}\n", "total hours", fit.total_hours));
    out
}

/// Format an observed-data fit.
pub fn format_fitted_curve(fit: &FittedCurve) -> String {
    format!(
        "Fitted unit curve (n={})\n  first unit cost {:.4}\n  natural slope   {:.6}\n  learning rate   {:.6}\n  R^2             {:.6}\n",
        fit.n_points, fit.first_unit_cost, fit.natural_slope, fit.learning_rate, fit.r_squared
    )
}

/// Format series as a table: one row per unit, one column per model.
pub fn format_series_table(series: &[CurveSeries], level: Level) -> String {
    let mut out = String::new();
    let Some(first) = series.first() else {
        return out;
    };

    let mut header = format!("{:>10}", "unit");
    for s in series {
        header.push_str(&format!(" {:>20}", s.model.key()));
    }
    out.push_str(&header);
    out.push('\n');

    for (row, x) in first.x.iter().enumerate() {
        let mut line = format!("{x:>10}");
        for s in series {
            let column = match level {
                Level::Unit => &s.value,
                Level::Cumulative => &s.cumulative_value,
            };
            line.push_str(&format!(" {}", fmt_value(column.get(row).copied())));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Format a sequence of values with their unit index.
pub fn format_indexed(start: f64, values: &[f64]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        out.push_str(&format!("{:>10} {}\n", start + i as f64, fmt_value(Some(*v))));
    }
    out
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:>20.6}"),
        Some(_) => format!("{:>20}", "NA"),
        None => format!("{:>20}", "-"),
    }
}
