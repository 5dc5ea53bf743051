//! Univariate ordinary least squares.
//!
//! We fit a single line `y = slope * x + intercept` over the whole league using
//! centered sums:
//!
//! ```text
//! slope     = Σ(x − x̄)(y − ȳ) / Σ(x − x̄)²
//! intercept = ȳ − slope·x̄
//! ```
//!
//! This is the same line as the raw normal equations, but centering avoids the
//! cancellation in `N·Σx² − (Σx)²` when the x values are large and close together.
//! The fit is degenerate only when every x is identical.

use crate::domain::{FitQuality, LinearFit, RegressionModel};
use crate::error::StandingsError;

/// Fit `y = slope * x + intercept` by least squares.
///
/// Fails with `DegenerateInput` when x has no variance (or contains non-finite
/// values) rather than returning NaN/∞ parameters.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LinearFit, StandingsError> {
    if xs.len() != ys.len() {
        return Err(StandingsError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(StandingsError::EmptyInput);
    }
    if let Some(i) = xs.iter().chain(ys).position(|v| !v.is_finite()) {
        let (axis, idx) = if i < xs.len() { ("x", i) } else { ("y", i - xs.len()) };
        return Err(StandingsError::DegenerateInput(format!(
            "non-finite {axis} value at position {idx}"
        )));
    }

    if xs.iter().all(|&x| x == xs[0]) {
        return Err(StandingsError::DegenerateInput(
            "scoring values have no variance across teams".to_string(),
        ));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    // Distinct x values can still underflow `sxx` to zero; the finiteness check catches it.
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(StandingsError::DegenerateInput(
            "regression produced non-finite parameters".to_string(),
        ));
    }

    let model = RegressionModel { slope, intercept };
    let quality = fit_quality(&model, xs, ys);
    Ok(LinearFit { model, quality })
}

fn fit_quality(model: &RegressionModel, xs: &[f64], ys: &[f64]) -> FitQuality {
    let n = xs.len();
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let r = y - model.evaluate(x);
        sse += r * r;
        sst += (y - mean_y) * (y - mean_y);
    }

    // All wins equal: nothing to explain.
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 0.0 };

    FitQuality {
        n,
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared,
    }
}
