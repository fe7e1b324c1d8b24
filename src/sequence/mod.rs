//! Axis tick sequences.

mod datetime;
mod numeric;

pub use datetime::{DateTimeSequence, DateTimeUnit};
pub use numeric::NumericSequence;
