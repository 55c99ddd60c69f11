//! Raw-code lookups: the label store behind the selectors and tables.
//!
//! The typed enums in [`crate::types`] never need these; they exist for
//! callers that only hold an axis and an integer code.

use crate::error::{CatalogError, Result};
use crate::types::{AgeRating, Axis, Category, Era, Genre, Length, Outcome, UserRating};

/// Map `code` on `axis` to its display string.
///
/// Fails with [`CatalogError::UnknownCode`] if `code` is not a key of the
/// axis's table.
pub fn display(axis: Axis, code: u8) -> Result<&'static str> {
    match axis {
        Axis::Genre => label_of::<Genre>(code),
        Axis::AgeRating => label_of::<AgeRating>(code),
        Axis::Length => label_of::<Length>(code),
        Axis::Era => label_of::<Era>(code),
        Axis::UserRating => label_of::<UserRating>(code),
        Axis::Outcome => label_of::<Outcome>(code),
    }
}

/// All `(code, label)` pairs of an axis in ascending code order.
pub fn options(axis: Axis) -> Vec<(u8, &'static str)> {
    match axis {
        Axis::Genre => entries::<Genre>(),
        Axis::AgeRating => entries::<AgeRating>(),
        Axis::Length => entries::<Length>(),
        Axis::Era => entries::<Era>(),
        Axis::UserRating => entries::<UserRating>(),
        Axis::Outcome => entries::<Outcome>(),
    }
}

fn label_of<C: Category>(code: u8) -> Result<&'static str> {
    C::from_code(code)
        .map(C::label)
        .ok_or(CatalogError::UnknownCode { axis: C::AXIS, code })
}

fn entries<C: Category>() -> Vec<(u8, &'static str)> {
    C::ALL.iter().map(|c| (c.code(), c.label())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_known_codes() {
        assert_eq!(display(Axis::Genre, 1), Ok("Action"));
        assert_eq!(display(Axis::Genre, 5), Ok("Horror"));
        assert_eq!(display(Axis::AgeRating, 3), Ok("16VL"));
        assert_eq!(display(Axis::Length, 4), Ok("Very Long"));
        assert_eq!(display(Axis::Era, 2), Ok("Retro"));
        assert_eq!(display(Axis::UserRating, 4), Ok("Excellent"));
        assert_eq!(display(Axis::Outcome, 0), Ok("Won't Watch"));
        assert_eq!(display(Axis::Outcome, 1), Ok("Will Watch"));
    }

    #[test]
    fn test_display_unknown_code() {
        // Length and era stop at 4, genre and age rating at 5
        assert_eq!(
            display(Axis::Length, 5),
            Err(CatalogError::UnknownCode {
                axis: Axis::Length,
                code: 5
            })
        );
        assert!(display(Axis::Genre, 0).is_err());
        assert!(display(Axis::Outcome, 2).is_err());
    }

    #[test]
    fn test_display_is_total_over_options() {
        for axis in Axis::ALL {
            let options = options(axis);
            assert!(!options.is_empty());
            for (code, label) in options {
                assert_eq!(display(axis, code), Ok(label));
                // Deterministic: a second lookup gives the same string
                assert_eq!(display(axis, code), display(axis, code));
            }
        }
    }

    #[test]
    fn test_option_counts() {
        assert_eq!(options(Axis::Genre).len(), 5);
        assert_eq!(options(Axis::AgeRating).len(), 5);
        assert_eq!(options(Axis::Length).len(), 4);
        assert_eq!(options(Axis::Era).len(), 4);
        assert_eq!(options(Axis::UserRating).len(), 4);
        assert_eq!(options(Axis::Outcome), vec![(0, "Won't Watch"), (1, "Will Watch")]);
    }
}
