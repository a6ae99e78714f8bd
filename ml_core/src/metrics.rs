use ndarray::ArrayView1;

use crate::{MlError, Result};

/// Mean of the squared differences between `y_true` and `y_pred`.
///
/// # Errors
/// Returns `MlError::ShapeMismatch` if the sequences are not row-aligned and
/// `MlError::EmptyInput` if they are empty.
pub fn mean_squared_error(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(MlError::ShapeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    (&y_pred - &y_true)
        .mapv(|d| d.powi(2))
        .mean()
        .ok_or(MlError::EmptyInput("evaluation set"))
}
