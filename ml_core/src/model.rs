use std::{fs, path::Path};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{encode::Encoder, listing::Listing, ols::LinearRegression, MlError, Result};

/// A fitted house price model, as persisted between training and serving.
///
/// Besides the regression parameters it keeps the encoder levels and the
/// ordered list of columns the coefficients were fitted on, so every
/// prediction is encoded and checked against the training-time layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePriceModel {
    feature_names: Vec<String>,
    encoder: Encoder,
    regression: LinearRegression,
}

impl HousePriceModel {
    /// Bundles a fitted encoder and regression.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` if the regression doesn't have one
    /// coefficient per encoded column.
    pub fn new(encoder: Encoder, regression: LinearRegression) -> Result<Self> {
        let model = Self {
            feature_names: encoder.columns(),
            encoder,
            regression,
        };
        model.validate()?;
        Ok(model)
    }

    /// Loads a model previously written by [`HousePriceModel::save`].
    ///
    /// # Errors
    /// Returns `MlError::Io` if the file cannot be read, `MlError::Json` if it
    /// is not a model document, and a schema error if its parts disagree.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let model: Self = serde_json::from_str(&content)?;
        model.validate()?;
        Ok(model)
    }

    /// Writes the model as pretty JSON.
    ///
    /// # Errors
    /// Returns `MlError::Io` if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Predicts the price of each listing, in order.
    ///
    /// # Errors
    /// Returns `MlError::UnknownCategory` for a category unseen during
    /// training and `MlError::ColumnMismatch` if the encoded columns don't
    /// line up with the fitted ones.
    pub fn predict(&self, listings: &[Listing]) -> Result<Array1<f64>> {
        let encoded = self
            .encoder
            .transform(listings)?
            .align_to(&self.feature_names)?;
        self.regression.predict(encoded.x().view())
    }

    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn validate(&self) -> Result<()> {
        self.encoder.validate()?;

        let expected = self.encoder.columns();
        if expected != self.feature_names {
            return Err(MlError::ColumnMismatch {
                expected,
                got: self.feature_names.clone(),
            });
        }

        let n_coefficients = self.regression.coefficients().len();
        if n_coefficients != self.feature_names.len() {
            return Err(MlError::ShapeMismatch {
                what: "coefficients",
                got: n_coefficients,
                expected: self.feature_names.len(),
            });
        }

        Ok(())
    }
}
