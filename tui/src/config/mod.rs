mod form;
pub mod json;

pub use form::{FormConfig, LabelVisibility};
