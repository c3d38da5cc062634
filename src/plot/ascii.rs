//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - unit (Crawford) model: `-` line
//! - cumulative-average (Wright) model: `=` line
//! - optional midpoint annotation: `*`

use crate::domain::{AnnotatedPoint, CurveSeries, ModelKind};

/// Which series column to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotValue {
    Unit,
    Cumulative,
}

/// Render one or more series on a shared grid.
pub fn render_ascii_plot(
    series: &[CurveSeries],
    midpoint: Option<&AnnotatedPoint>,
    value: PlotValue,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curves: Vec<(ModelKind, Vec<(f64, f64)>)> = series
        .iter()
        .map(|s| {
            let ys = match value {
                PlotValue::Unit => &s.value,
                PlotValue::Cumulative => &s.cumulative_value,
            };
            let points = s.x.iter().copied().zip(ys.iter().copied()).collect();
            (s.model, points)
        })
        .collect();

    let (x_min, x_max) = x_range(&curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&curves, midpoint).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (model, points) in &curves {
        draw_curve(&mut grid, points, line_char(*model), x_min, x_max, y_min, y_max);
    }

    // Midpoint last so it stays visible on top of the curve.
    if let Some(p) = midpoint {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.value, y_min, y_max, height);
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: unit=[{x_min:.1}, {x_max:.1}] | cost=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (model, _) in &curves {
        out.push_str(&format!("{} {}\n", line_char(*model), model.display_name()));
    }
    if let Some(p) = midpoint {
        out.push_str(&format!("* {}\n", p.label));
    }

    out
}

fn line_char(model: ModelKind) -> char {
    match model {
        ModelKind::Unit => '-',
        ModelKind::CumulativeAverage => '=',
    }
}

fn x_range(curves: &[(ModelKind, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in curves.iter().flat_map(|(_, pts)| pts.iter()) {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(
    curves: &[(ModelKind, Vec<(f64, f64)>)],
    midpoint: Option<&AnnotatedPoint>,
) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in curves.iter().flat_map(|(_, pts)| pts.iter()) {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if let Some(p) = midpoint {
        min_y = min_y.min(p.value);
        max_y = max_y.max(p.value);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, ch);
        } else if grid[yy][xx] == ' ' {
            grid[yy][xx] = ch;
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let series = vec![CurveSeries {
            model: ModelKind::Unit,
            x: vec![1.0, 10.0],
            value: vec![110.0, 100.0],
            cumulative_value: vec![110.0, 210.0],
        }];

        let txt = render_ascii_plot(&series, None, PlotValue::Unit, 10, 5);
        let expected = concat!(
            "Plot: unit=[1.0, 10.0] | cost=[99.50, 110.50]\n",
            "--        \n",
            "  --      \n",
            "    --    \n",
            "      --  \n",
            "        --\n",
            "- Crawford (unit)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn midpoint_marker_and_legend_are_drawn() {
        let series = vec![CurveSeries {
            model: ModelKind::CumulativeAverage,
            x: vec![1.0, 2.0, 3.0],
            value: vec![30.0, 20.0, 10.0],
            cumulative_value: vec![30.0, 50.0, 60.0],
        }];
        let mid = AnnotatedPoint {
            x: 2.0,
            value: 20.0,
            label: "midpoint".to_string(),
        };

        let txt = render_ascii_plot(&series, Some(&mid), PlotValue::Cumulative, 20, 8);
        assert_eq!(txt.matches('*').count(), 2);
        assert!(txt.contains("= Wright (cumulative average)\n"));
        assert!(txt.ends_with("* midpoint\n"));
    }
}
