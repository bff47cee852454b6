//! Conversion engine: range rescaling and the session that drives it

pub mod converter;
pub mod session;

pub use converter::{convert, convert_text, join_values, parse_number, parse_numbers, split_input};
pub use session::ConversionSession;
