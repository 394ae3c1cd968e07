//! Turning listing markup and validity text into brochure records.

pub mod brochure;
pub mod dates;
pub mod html;

#[cfg(test)]
mod tests;

pub use brochure::{BrochureExtractor, Rejection};
pub use dates::{DateRangeError, parse_date_range, parse_date_range_with_year};
pub use html::{MarkupLocator, ProspektLocator};
