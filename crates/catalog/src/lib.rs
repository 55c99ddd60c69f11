//! # Catalog Crate
//!
//! The encoder and label store for the movie watch predictor: five closed
//! feature axes, the binary outcome, and the fixed training table.
//!
//! ## Main Components
//!
//! - **types**: Category enums (Genre, AgeRating, Length, Era, UserRating,
//!   Outcome), the `Axis` enumeration and `MovieFeatures`
//! - **lookup**: Raw `(axis, code) -> label` lookups and selector options
//! - **training**: The 20 hand-authored labelled examples
//! - **error**: Error types for lookups and parsing
//!
//! ## Example Usage
//!
//! ```
//! use catalog::{display, training_table, Axis, Genre, MovieFeatures};
//!
//! assert_eq!(display(Axis::Genre, 1).unwrap(), "Action");
//! assert_eq!(Genre::Horror.to_string(), "Horror");
//!
//! let table = training_table();
//! assert_eq!(table.len(), 20);
//! assert_eq!(MovieFeatures::default().codes(), [1, 2, 2, 3, 3]);
//! ```

// Public modules
pub mod error;
pub mod lookup;
pub mod training;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use lookup::{display, options};
pub use training::{training_table, TrainingRow, TrainingTable};
pub use types::{
    // Constants and aliases
    FEATURE_COUNT,
    FeatureRow,
    // Axes
    Axis,
    Category,
    // Feature categories
    AgeRating,
    Era,
    Genre,
    Length,
    UserRating,
    // Label
    Outcome,
    // Composite
    MovieFeatures,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_training_row_displays() {
        // Every code used in the table must be a key of its axis
        for row in &training_table() {
            for (axis, code) in Axis::FEATURES.iter().zip(row.features.codes()) {
                assert!(display(*axis, code).is_ok());
            }
            assert!(display(Axis::Outcome, row.outcome.code()).is_ok());
        }
    }

    #[test]
    fn test_typed_and_raw_labels_agree() {
        let features = MovieFeatures::default();
        let labels: Vec<&str> = Axis::FEATURES
            .iter()
            .zip(features.codes())
            .map(|(axis, code)| display(*axis, code).unwrap())
            .collect();

        assert_eq!(labels, vec!["Action", "PG-13", "Medium", "Modern", "Good"]);
    }
}
