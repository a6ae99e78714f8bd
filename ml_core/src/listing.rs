use crate::{data::Table, MlError, Result};

/// CSV column holding the amount of bedrooms.
pub const ROOMS: &str = "nb_chambres";
/// CSV column holding the amount of living rooms.
pub const LIVING_ROOMS: &str = "nb_salon";
/// CSV column holding the parcel size.
pub const PARCEL_SIZE: &str = "taille_parcelle";
/// CSV column holding the municipality.
pub const MUNICIPALITY: &str = "commune";
/// CSV column holding the neighborhood.
pub const NEIGHBORHOOD: &str = "quartier";
/// CSV column holding the sale price, the regression target.
pub const PRICE: &str = "prix";

/// A single house description, the five predictors of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub rooms: u32,
    pub living_rooms: u32,
    pub parcel_size: u32,
    pub municipality: String,
    pub neighborhood: String,
}

impl Listing {
    pub fn new(
        rooms: u32,
        living_rooms: u32,
        parcel_size: u32,
        municipality: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            rooms,
            living_rooms,
            parcel_size,
            municipality: municipality.into(),
            neighborhood: neighborhood.into(),
        }
    }
}

/// Extracts the five predictor columns and the `prix` target from a table.
///
/// # Returns
/// The listings and their prices, row-aligned.
///
/// # Errors
/// Returns `MlError::MissingColumn` if any required column is absent and
/// `MlError::InvalidValue` if a numeric cell cannot be parsed.
pub fn select_features(table: &Table) -> Result<(Vec<Listing>, Vec<f64>)> {
    let rooms = table.column(ROOMS)?;
    let living_rooms = table.column(LIVING_ROOMS)?;
    let parcel_sizes = table.column(PARCEL_SIZE)?;
    let municipalities = table.column(MUNICIPALITY)?;
    let neighborhoods = table.column(NEIGHBORHOOD)?;
    let prices = table.column(PRICE)?;

    let mut listings = Vec::with_capacity(table.len());
    let mut targets = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        listings.push(Listing {
            rooms: parse_count(row, ROOMS, rooms[row])?,
            living_rooms: parse_count(row, LIVING_ROOMS, living_rooms[row])?,
            parcel_size: parse_count(row, PARCEL_SIZE, parcel_sizes[row])?,
            municipality: municipalities[row].to_string(),
            neighborhood: neighborhoods[row].to_string(),
        });
        targets.push(parse_price(row, prices[row])?);
    }

    Ok((listings, targets))
}

fn parse_count(row: usize, column: &'static str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| MlError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    })
}

fn parse_price(row: usize, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(MlError::InvalidValue {
            row,
            column: PRICE,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix,surface
0,3,1,500,A,X,100000,90
1,4,2,700,B,Y,150000.5,120
";

    #[test]
    fn select_features_ignores_extra_columns() {
        let table = Table::parse_csv(CSV).unwrap();
        let (listings, prices) = select_features(&table).unwrap();

        assert_eq!(
            listings,
            vec![
                Listing::new(3, 1, 500, "A", "X"),
                Listing::new(4, 2, 700, "B", "Y"),
            ]
        );
        assert_eq!(prices, vec![100000.0, 150000.5]);
    }

    #[test]
    fn select_features_requires_the_target() {
        let table = Table::parse_csv("nb_chambres,nb_salon,taille_parcelle,commune,quartier\n1,1,1,A,X\n").unwrap();
        match select_features(&table) {
            Err(MlError::MissingColumn(name)) => assert_eq!(name, PRICE),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn select_features_reports_unparsable_counts() {
        let table = Table::parse_csv(
            "nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n3,one,500,A,X,1\n",
        )
        .unwrap();

        match select_features(&table) {
            Err(MlError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, LIVING_ROOMS);
                assert_eq!(value, "one");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn select_features_rejects_non_finite_prices() {
        let table = Table::parse_csv(
            "nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n3,1,500,A,X,NaN\n",
        )
        .unwrap();
        assert!(matches!(
            select_features(&table),
            Err(MlError::InvalidValue { column: PRICE, .. })
        ));
    }
}
