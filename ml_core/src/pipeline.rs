use log::{info, warn};
use ndarray::Array1;

use crate::{
    config::TrainingConfig,
    data::Table,
    encode::encode,
    listing::select_features,
    metrics::mean_squared_error,
    model::HousePriceModel,
    ols::LinearRegression,
    split::train_test_split,
    Result,
};

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub model: HousePriceModel,
    pub n_train: usize,
    pub n_test: usize,
    /// Mean squared error on the held-out rows, `None` when none were held out.
    pub mse: Option<f64>,
}

/// Loads the CSV at `config.data_path` and trains a model on it.
///
/// # Errors
/// Returns an `MlError` if any step of the pipeline fails.
pub fn train(config: &TrainingConfig) -> Result<TrainingReport> {
    info!("loading {}", config.data_path.display());
    let table = Table::read_csv(&config.data_path)?;
    info!("loaded {} rows", table.len());
    train_on_table(&table, config.test_fraction, config.seed)
}

/// Runs select → encode → split → fit → evaluate on an already loaded table.
///
/// # Errors
/// Returns an `MlError` if any step of the pipeline fails.
pub fn train_on_table(table: &Table, test_fraction: f64, seed: u64) -> Result<TrainingReport> {
    let (listings, prices) = select_features(table)?;

    let (encoder, encoded) = encode(&listings)?;
    info!(
        "encoded {} rows into {} columns",
        encoded.x().nrows(),
        encoded.columns().len()
    );

    let prices = Array1::from(prices);
    let split = train_test_split(encoded.x().view(), prices.view(), test_fraction, seed)?;
    info!(
        "split into {} training and {} evaluation rows (seed {seed})",
        split.y_train.len(),
        split.y_test.len()
    );

    let regression = LinearRegression::fit(split.x_train.view(), split.y_train.view())?;
    info!("fitted model, intercept = {}", regression.intercept());

    let mse = if split.y_test.is_empty() {
        warn!("no evaluation rows were held out, skipping evaluation");
        None
    } else {
        let y_pred = regression.predict(split.x_test.view())?;
        let mse = mean_squared_error(split.y_test.view(), y_pred.view())?;
        info!("mean squared error: {mse}");
        Some(mse)
    };

    Ok(TrainingReport {
        model: HousePriceModel::new(encoder, regression)?,
        n_train: split.y_train.len(),
        n_test: split.y_test.len(),
        mse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;

    #[test]
    fn two_rows_train_on_both_and_predict() {
        let table = Table::parse_csv(
            "nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n\
             3,1,500,A,X,100000\n\
             4,2,700,B,Y,150000\n",
        )
        .unwrap();

        let report = train_on_table(&table, 0.2, 42).unwrap();

        assert_eq!(report.n_train, 2);
        assert_eq!(report.n_test, 0);
        assert_eq!(report.mse, None);

        let price = report
            .model
            .predict(&[Listing::new(3, 1, 500, "A", "X")])
            .unwrap()[0];
        assert!(price.is_finite());
        assert!((price - 100_000.0).abs() < 1e-4, "got {price}");
    }

    #[test]
    fn more_categories_than_listings_still_fit() {
        let table = Table::parse_csv(
            "nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n\
             3,1,500,A,X,100000\n\
             4,2,700,B,Y,150000\n\
             2,1,350,A,Y,80000\n\
             5,3,900,C,X,210000\n",
        )
        .unwrap();

        let report = train_on_table(&table, 0.0, 42).unwrap();
        assert_eq!(report.n_train, 4);
        let price = report
            .model
            .predict(&[Listing::new(5, 3, 900, "C", "X")])
            .unwrap()[0];
        assert!((price - 210_000.0).abs() < 1e-3, "got {price}");

        let report = train_on_table(&table, 0.2, 42).unwrap();
        assert_eq!((report.n_train, report.n_test), (3, 1));
        assert!(report.mse.is_some_and(f64::is_finite));
    }

    #[test]
    fn many_sparse_categories_still_fit() {
        let mut csv = String::from("nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n");
        for i in 0..8u32 {
            csv.push_str(&format!(
                "{},{},{},C{},Q{},{}\n",
                1 + i % 4,
                1 + i % 2,
                200 + 50 * i,
                i % 6,
                i % 5,
                90_000 + 7_000 * i
            ));
        }
        let table = Table::parse_csv(&csv).unwrap();

        let report = train_on_table(&table, 0.2, 42).unwrap();
        assert_eq!(report.model.feature_names().len(), 3 + 5 + 4);
        assert!(report.mse.is_some_and(f64::is_finite));
    }

    #[test]
    fn missing_columns_fail_before_fitting() {
        let table = Table::parse_csv("nb_chambres,prix\n3,1\n").unwrap();
        assert!(train_on_table(&table, 0.2, 42).is_err());
    }
}
