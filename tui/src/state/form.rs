use std::fmt;

use ml_core::{HousePriceModel, Listing};

/// Message shown when a numeric field does not hold a non-negative integer.
pub const INVALID_NUMBERS_MSG: &str =
    "Please enter valid numbers for living rooms, rooms and parcel size.";

/// Message shown when no model artifact could be loaded.
pub const MODEL_UNAVAILABLE_MSG: &str = "The regression model is not available.";

/// The five form inputs, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Municipality,
    Neighborhood,
    ParcelSize,
    LivingRooms,
    Rooms,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Municipality,
        Field::Neighborhood,
        Field::ParcelSize,
        Field::LivingRooms,
        Field::Rooms,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Municipality => "Municipality",
            Field::Neighborhood => "Neighborhood",
            Field::ParcelSize => "Parcel size",
            Field::LivingRooms => "Living rooms",
            Field::Rooms => "Rooms",
        }
    }

    fn index(self) -> usize {
        Field::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Raw text typed by the user, nothing is converted until [`FormInput::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub municipality: String,
    pub neighborhood: String,
    pub parcel_size: String,
    pub living_rooms: String,
    pub rooms: String,
}

/// Why a submission did not produce an estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A numeric field holds something other than a non-negative integer.
    InvalidNumbers { fields: Vec<Field> },
    /// No model artifact is loaded.
    ModelUnavailable,
    /// The model refused the listing (unknown category, column mismatch...).
    Prediction(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidNumbers { .. } => write!(f, "{INVALID_NUMBERS_MSG}"),
            FormError::ModelUnavailable => write!(f, "{MODEL_UNAVAILABLE_MSG}"),
            FormError::Prediction(msg) => write!(f, "Cannot estimate the price: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}

/// What the form displays after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Estimate(f64),
    Error(FormError),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Estimate(price) => {
                format!("Estimated price for this house: {price:.2} $")
            }
            Outcome::Error(e) => e.to_string(),
        }
    }
}

impl FormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Municipality => &self.municipality,
            Field::Neighborhood => &self.neighborhood,
            Field::ParcelSize => &self.parcel_size,
            Field::LivingRooms => &self.living_rooms,
            Field::Rooms => &self.rooms,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Municipality => &mut self.municipality,
            Field::Neighborhood => &mut self.neighborhood,
            Field::ParcelSize => &mut self.parcel_size,
            Field::LivingRooms => &mut self.living_rooms,
            Field::Rooms => &mut self.rooms,
        }
    }

    /// Converts the three numeric fields and assembles a listing.
    ///
    /// A numeric field is valid when it is non-empty, made only of ASCII digits
    /// and fits in a `u32`.
    ///
    /// # Errors
    /// Returns `FormError::InvalidNumbers` naming every invalid field.
    pub fn validate(&self) -> Result<Listing, FormError> {
        let parcel_size = parse_count(&self.parcel_size);
        let living_rooms = parse_count(&self.living_rooms);
        let rooms = parse_count(&self.rooms);

        match (parcel_size, living_rooms, rooms) {
            (Some(parcel_size), Some(living_rooms), Some(rooms)) => Ok(Listing::new(
                rooms,
                living_rooms,
                parcel_size,
                self.municipality.as_str(),
                self.neighborhood.as_str(),
            )),
            (p, l, r) => {
                let fields = [
                    (Field::ParcelSize, p),
                    (Field::LivingRooms, l),
                    (Field::Rooms, r),
                ]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(f, _)| f)
                .collect();
                Err(FormError::InvalidNumbers { fields })
            }
        }
    }
}

/// Parses a count typed in a numeric field.
///
/// Stricter than a Unicode `isdigit` check followed by an unbounded integer
/// parse: non-ASCII digits and values above `u32::MAX` are rejected too.
fn parse_count(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Runs collect → validate → predict-or-error for one submission.
///
/// Validation failures stop here: no row is assembled and no prediction is
/// attempted.
pub fn submit(input: &FormInput, model: Option<&HousePriceModel>) -> Outcome {
    let listing = match input.validate() {
        Ok(listing) => listing,
        Err(e) => {
            log::debug!("rejected form input: {input:?}");
            return Outcome::Error(e);
        }
    };

    let Some(model) = model else {
        log::warn!("estimate requested without a loaded model");
        return Outcome::Error(FormError::ModelUnavailable);
    };

    match model.predict(std::slice::from_ref(&listing)) {
        Ok(prices) => match prices.first() {
            Some(&price) => {
                log::info!("estimated {price:.2} for {listing:?}");
                Outcome::Estimate(price)
            }
            None => Outcome::Error(FormError::Prediction("no prediction returned".into())),
        },
        Err(e) => {
            log::warn!("prediction failed: {e}");
            Outcome::Error(FormError::Prediction(e.to_string()))
        }
    }
}
