use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    listing::{Listing, LIVING_ROOMS, MUNICIPALITY, NEIGHBORHOOD, PARCEL_SIZE, ROOMS},
    MlError, Result,
};

/// One-hot encoder for the `commune` and `quartier` columns.
///
/// The levels of each categorical column are kept sorted; the first one is the
/// reference category and gets no indicator column. Fitting the same category
/// set always yields the same columns in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoder {
    municipalities: Vec<String>,
    neighborhoods: Vec<String>,
}

/// A dense encoded feature matrix and the name of each of its columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    columns: Vec<String>,
    x: Array2<f64>,
}

impl Encoder {
    /// Records the distinct categories observed in `listings`.
    pub fn fit(listings: &[Listing]) -> Self {
        let levels = |get: fn(&Listing) -> &str| {
            listings
                .iter()
                .map(get)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<String>>()
        };

        Self {
            municipalities: levels(|l| l.municipality.as_str()),
            neighborhoods: levels(|l| l.neighborhood.as_str()),
        }
    }

    pub fn municipalities(&self) -> &[String] {
        &self.municipalities
    }

    pub fn neighborhoods(&self) -> &[String] {
        &self.neighborhoods
    }

    /// Checks that both level lists are strictly sorted, which is what
    /// [`Encoder::fit`] produces and what the level lookup relies on.
    ///
    /// # Errors
    /// Returns `MlError::InvalidInput` naming the first out of order or
    /// duplicated level.
    pub fn validate(&self) -> Result<()> {
        for (column, levels) in [
            (MUNICIPALITY, &self.municipalities),
            (NEIGHBORHOOD, &self.neighborhoods),
        ] {
            if let Some(pair) = levels.windows(2).find(|pair| pair[0] >= pair[1]) {
                return Err(MlError::InvalidInput(format!(
                    "{column} levels must be sorted and unique, found '{}' before '{}'",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }

    /// Returns the name of every encoded column, in matrix order.
    pub fn columns(&self) -> Vec<String> {
        let indicators = |prefix: &str, levels: &[String]| {
            levels
                .iter()
                .skip(1)
                .map(|level| format!("{prefix}_{level}"))
                .collect::<Vec<_>>()
        };

        [ROOMS, LIVING_ROOMS, PARCEL_SIZE]
            .into_iter()
            .map(str::to_string)
            .chain(indicators(MUNICIPALITY, &self.municipalities))
            .chain(indicators(NEIGHBORHOOD, &self.neighborhoods))
            .collect()
    }

    /// Encodes `listings` against the fitted levels.
    ///
    /// # Errors
    /// Returns `MlError::UnknownCategory` if a listing holds a category that was
    /// not seen by [`Encoder::fit`].
    pub fn transform(&self, listings: &[Listing]) -> Result<Encoded> {
        let columns = self.columns();
        let n_municipalities = self.municipalities.len().saturating_sub(1);
        let mut x = Array2::zeros((listings.len(), columns.len()));

        for (mut row, listing) in x.rows_mut().into_iter().zip(listings) {
            row[0] = f64::from(listing.rooms);
            row[1] = f64::from(listing.living_rooms);
            row[2] = f64::from(listing.parcel_size);

            let m = level_index(&self.municipalities, MUNICIPALITY, &listing.municipality)?;
            if let Some(m) = m {
                row[3 + m] = 1.0;
            }

            let n = level_index(&self.neighborhoods, NEIGHBORHOOD, &listing.neighborhood)?;
            if let Some(n) = n {
                row[3 + n_municipalities + n] = 1.0;
            }
        }

        Ok(Encoded { columns, x })
    }
}

/// Position of `value`'s indicator column within its field, `None` for the reference.
fn level_index(levels: &[String], column: &'static str, value: &str) -> Result<Option<usize>> {
    match levels.binary_search_by(|level| level.as_str().cmp(value)) {
        Ok(0) => Ok(None),
        Ok(i) => Ok(Some(i - 1)),
        Err(_) => Err(MlError::UnknownCategory {
            column,
            value: value.to_string(),
        }),
    }
}

/// Fits an encoder on `listings` and encodes them with it.
pub fn encode(listings: &[Listing]) -> Result<(Encoder, Encoded)> {
    let encoder = Encoder::fit(listings);
    let encoded = encoder.transform(listings)?;
    Ok((encoder, encoded))
}

impl Encoded {
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Reorders the columns to follow `columns`.
    ///
    /// # Errors
    /// Returns `MlError::ColumnMismatch` if a column is missing on either side.
    pub fn align_to(&self, columns: &[String]) -> Result<Encoded> {
        let mismatch = || MlError::ColumnMismatch {
            expected: columns.to_vec(),
            got: self.columns.clone(),
        };

        if columns.len() != self.columns.len() {
            return Err(mismatch());
        }

        let order = columns
            .iter()
            .map(|c| self.columns.iter().position(|own| own == c))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(mismatch)?;

        Ok(Encoded {
            columns: columns.to_vec(),
            x: self.x.select(ndarray::Axis(1), &order),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn listings() -> Vec<Listing> {
        vec![
            Listing::new(3, 1, 500, "Ngaliema", "Binza"),
            Listing::new(4, 2, 700, "Gombe", "Centre"),
            Listing::new(2, 1, 300, "Limete", "Binza"),
        ]
    }

    #[test]
    fn columns_drop_the_smallest_level() {
        let (encoder, encoded) = encode(&listings()).unwrap();

        assert_eq!(encoder.municipalities(), ["Gombe", "Limete", "Ngaliema"]);
        assert_eq!(encoder.neighborhoods(), ["Binza", "Centre"]);
        assert_eq!(
            encoded.columns(),
            [
                "nb_chambres",
                "nb_salon",
                "taille_parcelle",
                "commune_Limete",
                "commune_Ngaliema",
                "quartier_Centre",
            ]
        );
        assert_eq!(
            encoded.x(),
            &array![
                [3., 1., 500., 0., 1., 0.],
                [4., 2., 700., 0., 0., 1.],
                [2., 1., 300., 1., 0., 0.],
            ]
        );
    }

    #[test]
    fn encoding_twice_is_deterministic() {
        let (_, first) = encode(&listings()).unwrap();
        let mut shuffled = listings();
        shuffled.reverse();
        let (_, second) = encode(&listings()).unwrap();
        let (_, reversed) = encode(&shuffled).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.columns(), reversed.columns());
    }

    #[test]
    fn single_level_yields_no_indicator_columns() {
        let data = vec![
            Listing::new(3, 1, 500, "Gombe", "X"),
            Listing::new(4, 2, 700, "Gombe", "Y"),
        ];
        let (_, encoded) = encode(&data).unwrap();

        assert!(!encoded.columns().iter().any(|c| c.starts_with("commune_")));
        assert_eq!(encoded.columns().last().unwrap(), "quartier_Y");
    }

    #[test]
    fn transform_uses_training_levels_for_a_single_row() {
        let encoder = Encoder::fit(&listings());
        let row = encoder
            .transform(&[Listing::new(5, 2, 900, "Ngaliema", "Centre")])
            .unwrap();

        assert_eq!(row.columns(), encoder.columns().as_slice());
        assert_eq!(row.x(), &array![[5., 2., 900., 0., 1., 1.]]);
    }

    #[test]
    fn transform_rejects_unknown_categories() {
        let encoder = Encoder::fit(&listings());
        let err = encoder
            .transform(&[Listing::new(1, 1, 1, "Kinshasa", "Binza")])
            .unwrap_err();

        match err {
            MlError::UnknownCategory { column, value } => {
                assert_eq!(column, MUNICIPALITY);
                assert_eq!(value, "Kinshasa");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unsorted_or_duplicated_levels() {
        assert!(Encoder::fit(&listings()).validate().is_ok());

        let unsorted = Encoder {
            municipalities: vec!["B".into(), "A".into(), "C".into()],
            neighborhoods: vec!["X".into()],
        };
        assert!(matches!(unsorted.validate(), Err(MlError::InvalidInput(_))));

        let duplicated = Encoder {
            municipalities: vec!["A".into()],
            neighborhoods: vec!["X".into(), "X".into()],
        };
        assert!(matches!(duplicated.validate(), Err(MlError::InvalidInput(_))));
    }

    #[test]
    fn align_to_reorders_columns() {
        let (_, encoded) = encode(&listings()).unwrap();
        let mut reversed = encoded.columns().to_vec();
        reversed.reverse();

        let aligned = encoded.align_to(&reversed).unwrap();
        assert_eq!(aligned.columns(), reversed.as_slice());
        assert_eq!(aligned.x().row(0).to_vec(), vec![0., 1., 0., 500., 1., 3.]);
    }

    #[test]
    fn align_to_fails_on_mismatch() {
        let (_, encoded) = encode(&listings()).unwrap();
        let mut columns = encoded.columns().to_vec();
        columns[3] = "commune_Kintambo".to_string();

        assert!(matches!(
            encoded.align_to(&columns),
            Err(MlError::ColumnMismatch { .. })
        ));
        assert!(matches!(
            encoded.align_to(&columns[..2]),
            Err(MlError::ColumnMismatch { .. })
        ));
    }
}
