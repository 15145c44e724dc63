//! Ordinary least squares with an intercept
//!
//! The design is centered, so the intercept is recovered from the means. The
//! centered system is solved through its singular value decomposition,
//! dropping singular values below a relative cutoff. A rank-deficient design
//! therefore gets the minimum-norm solution: a predictor that is constant
//! within the group receives a zero coefficient instead of failing the fit.

use nalgebra::{DMatrix, DVector};

/// Why a group cannot be fitted
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DegenerateFit {
    #[error("no rows to fit")]
    Empty,
    /// NaN or infinite inputs
    #[error("non-finite value in {column}")]
    NonFinite { column: String },
    #[error("least squares solve failed: {0}")]
    Solve(String),
}

/// A fitted linear model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit<const P: usize> {
    pub coefficients: [f64; P],
    pub intercept: f64,
    /// `None` for a single row, or when the response is constant and the fit is not exact
    pub r_squared: Option<f64>,
    /// Number of predictor directions that carried information
    pub rank: usize,
}

impl<const P: usize> LinearFit<P> {
    /// Intercept-only model
    fn constant(intercept: f64, r_squared: Option<f64>) -> Self {
        Self {
            coefficients: [0.0; P],
            intercept,
            r_squared,
            rank: 0,
        }
    }
}

/// Fit `y ~ 1 + x` by least squares
///
/// `names` labels the predictor columns in error messages. A single row
/// yields the intercept-only model with no r-squared.
pub fn fit_ols<const P: usize>(
    x: &[[f64; P]],
    y: &[f64],
    names: &[&str; P],
) -> Result<LinearFit<P>, DegenerateFit> {
    let n = y.len();
    debug_assert_eq!(x.len(), n);
    if n == 0 {
        return Err(DegenerateFit::Empty);
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(DegenerateFit::NonFinite {
            column: "response".to_string(),
        });
    }
    for (j, name) in names.iter().enumerate() {
        if x.iter().any(|row| !row[j].is_finite()) {
            return Err(DegenerateFit::NonFinite {
                column: (*name).to_string(),
            });
        }
    }

    // r-squared needs at least two samples
    if n == 1 {
        return Ok(LinearFit::constant(y[0], None));
    }
    // constant response: the intercept alone is an exact fit
    if y.iter().all(|v| *v == y[0]) {
        return Ok(LinearFit::constant(y[0], Some(1.0)));
    }

    let design = DMatrix::from_fn(n, P, |i, j| x[i][j]);
    let response = DVector::from_column_slice(y);
    let x_mean: [f64; P] = std::array::from_fn(|j| design.column(j).mean());
    let y_mean = response.mean();

    let centered = DMatrix::from_fn(n, P, |i, j| design[(i, j)] - x_mean[j]);
    let y_centered = response.add_scalar(-y_mean);

    let (beta, rank) = min_norm_solve(centered, &y_centered)?;
    let coefficients: [f64; P] = std::array::from_fn(|j| beta[j]);
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(b, mean)| b * mean)
            .sum::<f64>();

    let fitted = &design * &beta;
    let rss: f64 = response
        .iter()
        .zip(fitted.iter())
        .map(|(observed, predicted)| (observed - (predicted + intercept)).powi(2))
        .sum();
    let tss = y_centered.norm_squared();

    let r_squared = if tss > 0.0 {
        Some(1.0 - rss / tss)
    } else if rss == 0.0 {
        Some(1.0)
    } else {
        None
    };

    Ok(LinearFit {
        coefficients,
        intercept,
        r_squared,
        rank,
    })
}

/// Minimum-norm least squares solution of `a * beta = b` and the numerical rank of `a`
///
/// Singular values at or below `max(sigma) * max(rows, cols) * EPSILON` are
/// treated as zero.
fn min_norm_solve(a: DMatrix<f64>, b: &DVector<f64>) -> Result<(DVector<f64>, usize), DegenerateFit> {
    let (rows, cols) = a.shape();
    let svd = a.svd(true, true);
    let largest = svd.singular_values.max();
    if largest <= 0.0 {
        return Ok((DVector::zeros(cols), 0));
    }

    let cutoff = largest * rows.max(cols) as f64 * f64::EPSILON;
    let rank = svd.rank(cutoff);
    let beta = svd
        .solve(b, cutoff)
        .map_err(|e| DegenerateFit::Solve(e.to_string()))?;
    Ok((beta, rank))
}
