use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::{MlError, Result};

/// Upper bound of Jacobi sweeps before giving up on the decomposition.
const MAX_SWEEPS: usize = 100;

/// Two columns are considered orthogonal below this relative inner product.
const ORTHOGONALITY_TOL: f64 = 1e-12;

/// A column whose norm is below this fraction of the matrix norm is treated
/// as zero: it is no longer rotated and contributes no singular value.
const NEGLIGIBLE_NORM: f64 = 1e-12;

/// An ordinary least-squares linear model: `y = x · coefficients + intercept`.
///
/// Fitted once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Creates a model from already known parameters.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Fits the model minimizing the sum of squared residuals in closed form.
    ///
    /// The data is centered so the intercept can be recovered from the means,
    /// then the coefficients are the minimum-norm least-squares solution of the
    /// centered system, obtained from its singular value decomposition. This
    /// resolves rank-deficient designs, e.g. fewer rows than columns.
    ///
    /// # Errors
    /// Returns `MlError::EmptyInput` without rows, `MlError::ShapeMismatch` if
    /// `x` and `y` are not row-aligned, `MlError::InvalidInput` on non-finite
    /// values and `MlError::NotConverged` if the decomposition does not settle.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(MlError::EmptyInput("training set"));
        }

        if x.nrows() != y.len() {
            return Err(MlError::ShapeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if !x.iter().chain(y.iter()).all(|v| v.is_finite()) {
            return Err(MlError::InvalidInput(
                "training data holds non-finite values".into(),
            ));
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or(MlError::EmptyInput("training set"))?;
        let y_mean = y.mean().ok_or(MlError::EmptyInput("training set"))?;

        let centered_x = &x - &x_mean;
        let centered_y = &y - y_mean;

        let coefficients = min_norm_lstsq(centered_x, centered_y.view())?;
        let intercept = y_mean - x_mean.dot(&coefficients);

        Ok(Self {
            coefficients: coefficients.to_vec(),
            intercept,
        })
    }

    /// Predicts one value per row of `x`, in row order.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` if `x` doesn't have one column per coefficient.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(MlError::ShapeMismatch {
                what: "feature columns",
                got: x.ncols(),
                expected: self.coefficients.len(),
            });
        }

        let w = ArrayView1::from(&self.coefficients);
        Ok(x.dot(&w) + self.intercept)
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Solves `min ||a·w - b||` with the smallest `||w||` among the minimizers.
///
/// Uses a one-sided Jacobi SVD: the columns of `a` are rotated pairwise until
/// they are mutually orthogonal, accumulating the rotations in `v`. At that
/// point `a = u·Σ` and `w = Σ⁺ (a_j · b / σ_j²) v_j`, skipping the singular
/// values below the rank tolerance.
///
/// Rotations preserve the Frobenius norm of `a`, so columns that collapse to
/// rounding noise in a rank-deficient design are detected against it and left
/// out of the rotations.
fn min_norm_lstsq(mut a: Array2<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    let (n, p) = a.dim();
    let mut v = Array2::<f64>::eye(p);

    let frobenius = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let negligible = NEGLIGIBLE_NORM * frobenius;
    let negligible_sq = negligible * negligible;

    let mut converged = p < 2;
    for _ in 0..MAX_SWEEPS {
        if converged {
            break;
        }

        let mut rotated = false;
        for i in 0..p {
            for j in i + 1..p {
                let alpha = a.column(i).dot(&a.column(i));
                let beta = a.column(j).dot(&a.column(j));
                let gamma = a.column(i).dot(&a.column(j));

                if alpha <= negligible_sq
                    || beta <= negligible_sq
                    || gamma.abs() <= ORTHOGONALITY_TOL * (alpha * beta).sqrt()
                {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                rotate(&mut a, i, j, c, s);
                rotate(&mut v, i, j, c, s);
            }
        }

        converged = !rotated;
    }

    if !converged {
        return Err(MlError::NotConverged {
            sweeps: MAX_SWEEPS,
        });
    }

    let sigmas: Vec<f64> = a
        .columns()
        .into_iter()
        .map(|col| col.dot(&col).sqrt())
        .collect();
    let sigma_max = sigmas.iter().copied().fold(0.0, f64::max);
    let tol = (sigma_max * n.max(p) as f64 * f64::EPSILON).max(negligible);

    let mut w = Array1::zeros(p);
    for (j, &sigma) in sigmas.iter().enumerate() {
        if sigma <= tol || sigma == 0.0 {
            continue;
        }
        let scale = a.column(j).dot(&b) / (sigma * sigma);
        w.scaled_add(scale, &v.column(j));
    }

    Ok(w)
}

/// Applies the Jacobi rotation `(c, s)` to columns `i` and `j` of `m`.
fn rotate(m: &mut Array2<f64>, i: usize, j: usize, c: f64, s: f64) {
    for mut row in m.rows_mut() {
        let (mi, mj) = (row[i], row[j]);
        row[i] = c * mi - s * mj;
        row[j] = s * mi + c * mj;
    }
}
