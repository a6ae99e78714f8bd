//! House price estimation: CSV loading, one-hot encoding, a seeded train/test
//! split and an ordinary least-squares model persisted as JSON.

pub mod config;
pub mod data;
pub mod encode;
mod error;
pub mod listing;
pub mod metrics;
pub mod model;
pub mod ols;
pub mod pipeline;
pub mod split;

pub use config::TrainingConfig;
pub use error::{MlError, Result};
pub use listing::Listing;
pub use model::HousePriceModel;
pub use pipeline::{train, TrainingReport};
