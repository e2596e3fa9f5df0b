//! Value normalization for translated fields.
//!
//! - **datetime**: Symphony date shapes to `YYYY-MM-DD[ HH:MM:SS]`
//! - **text**: prefix stripping for branch codes and tagged entries

pub mod datetime;
pub mod text;

pub use datetime::{Clock, DateForm, DateNormalizer, FixedClock, SystemClock};
pub use text::{strip_leading_chars, take_leading_chars};
