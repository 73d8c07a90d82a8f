//! Pure calculators: no I/O, no shared state.

pub mod chainage;
pub mod hours;
pub mod paving;

pub use chainage::{chainage_distance, format_chainage, is_valid_chainage, parse_chainage};
pub use hours::{ShiftHours, calculate_hours, shift_hours};
pub use paving::{Conversion, PavingEstimate, UsageQuote, estimate_paving, quote_usage};
