//! Record source for six-attribute creature statistics stored as CSV.
//!
//! Records are read once into memory, selected by a contiguous index range,
//! and reduced to planar points with [`offense_defense`] before clustering.

mod errors;
mod record;
mod source;

pub use errors::StatSourceError;
pub use record::{StatRecord, offense_defense};
pub use source::StatSource;

#[cfg(test)]
mod tests;
