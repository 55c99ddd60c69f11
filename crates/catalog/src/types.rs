//! Core category types for the movie feature axes.
//!
//! Each feature axis (genre, age rating, length, era, user rating) is a
//! small closed set of values. On the wire and inside the classifier these
//! are plain integer codes; inside Rust they are enums, so a value that
//! exists as a `Genre` can always be displayed without a fallible lookup.
//!
//! Rust concepts demonstrated here:
//! - Declarative macros to stamp out several near-identical enums
//! - A trait with associated constants (`Category::AXIS`, `Category::ALL`)
//! - Hand-written serde impls that (de)serialize enums as integer codes

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, Result};

// =============================================================================
// Axes
// =============================================================================

/// Number of feature axes fed to the classifier
pub const FEATURE_COUNT: usize = 5;

/// One encoded movie: the five feature codes in axis order
/// (genre, age rating, length, era, user rating)
pub type FeatureRow = [u8; FEATURE_COUNT];

/// The five feature axes plus the outcome axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Genre,
    AgeRating,
    Length,
    Era,
    UserRating,
    #[serde(rename = "will_watch")]
    Outcome,
}

impl Axis {
    /// Feature axes in the column order used by `FeatureRow`
    pub const FEATURES: [Axis; FEATURE_COUNT] = [
        Axis::Genre,
        Axis::AgeRating,
        Axis::Length,
        Axis::Era,
        Axis::UserRating,
    ];

    /// Every axis, features first, outcome last
    pub const ALL: [Axis; FEATURE_COUNT + 1] = [
        Axis::Genre,
        Axis::AgeRating,
        Axis::Length,
        Axis::Era,
        Axis::UserRating,
        Axis::Outcome,
    ];

    /// Column name used in tables, query strings and JSON bodies
    pub fn column(self) -> &'static str {
        match self {
            Axis::Genre => "genre",
            Axis::AgeRating => "age_rating",
            Axis::Length => "length",
            Axis::Era => "era",
            Axis::UserRating => "user_rating",
            Axis::Outcome => "will_watch",
        }
    }

    /// Human-readable title shown next to a selector
    pub fn title(self) -> &'static str {
        match self {
            Axis::Genre => "Genre",
            Axis::AgeRating => "Age Rating",
            Axis::Length => "Movie Length",
            Axis::Era => "Release Era",
            Axis::UserRating => "User Rating",
            Axis::Outcome => "Will Watch",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// =============================================================================
// Category trait
// =============================================================================

/// A closed set of values belonging to one axis.
///
/// Rust concept: associated constants let generic code ask a type
/// "which axis are you?" and "what are all your values?" without an instance.
pub trait Category: Copy + Sized + 'static {
    /// The axis this category belongs to
    const AXIS: Axis;

    /// Every value, in ascending code order
    const ALL: &'static [Self];

    /// Integer code used by the classifier
    fn code(self) -> u8;

    /// Display string
    fn label(self) -> &'static str;

    /// Reverse lookup; `None` if the code is not part of this axis
    fn from_code(code: u8) -> Option<Self>;
}

/// Parse a category from either its numeric code or its label.
///
/// Labels are matched case-insensitively and ignoring punctuation and
/// whitespace, so `"PG-13"`, `"pg13"` and `"pg-13"` all name the same rating,
/// and `"very-long"` matches `"Very Long"`.
pub fn parse_category<C: Category>(value: &str) -> Result<C> {
    let trimmed = value.trim();

    if let Ok(code) = trimmed.parse::<u8>() {
        return C::from_code(code).ok_or(CatalogError::UnknownCode { axis: C::AXIS, code });
    }

    let wanted = fold(trimmed);
    C::ALL
        .iter()
        .copied()
        .find(|category| fold(category.label()) == wanted)
        .ok_or_else(|| CatalogError::UnknownLabel {
            axis: C::AXIS,
            value: value.to_string(),
        })
}

fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Stamps out a category enum together with its `Category`, `Display`,
/// `TryFrom<u8>`, `FromStr` and serde impls.
macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident => $axis:ident {
            $( $variant:ident = $code:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl Category for $name {
            const AXIS: Axis = Axis::$axis;
            const ALL: &'static [Self] = &[ $( $name::$variant, )+ ];

            fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl TryFrom<u8> for $name {
            type Error = CatalogError;

            fn try_from(code: u8) -> Result<Self> {
                <$name as Category>::from_code(code).ok_or(CatalogError::UnknownCode {
                    axis: Axis::$axis,
                    code,
                })
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(value: &str) -> Result<Self> {
                parse_category(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                $name::try_from(code).map_err(de::Error::custom)
            }
        }
    };
}

// =============================================================================
// Feature categories
// =============================================================================

category! {
    /// Movie genre
    Genre => Genre {
        Action = 1 => "Action",
        Comedy = 2 => "Comedy",
        Drama = 3 => "Drama",
        Romance = 4 => "Romance",
        Horror = 5 => "Horror",
    }
}

category! {
    /// Audience age rating
    AgeRating => AgeRating {
        Pg = 1 => "PG",
        Pg13 = 2 => "PG-13",
        SixteenVl = 3 => "16VL",
        EighteenPlus = 4 => "18+",
        R = 5 => "R",
    }
}

category! {
    /// Running time bucket
    Length => Length {
        Short = 1 => "Short",
        Medium = 2 => "Medium",
        Long = 3 => "Long",
        VeryLong = 4 => "Very Long",
    }
}

category! {
    /// Release era
    Era => Era {
        Classic = 1 => "Classic",
        Retro = 2 => "Retro",
        Modern = 3 => "Modern",
        Latest = 4 => "Latest",
    }
}

category! {
    /// What other users thought of the movie
    UserRating => UserRating {
        Poor = 1 => "Poor",
        Average = 2 => "Average",
        Good = 3 => "Good",
        Excellent = 4 => "Excellent",
    }
}

category! {
    /// The binary label the classifier predicts
    Outcome => Outcome {
        WontWatch = 0 => "Won't Watch",
        WillWatch = 1 => "Will Watch",
    }
}

impl Outcome {
    /// Class index used by the classifier (0 or 1)
    pub fn index(self) -> usize {
        usize::from(self.code())
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_code)
    }

    pub fn is_will_watch(self) -> bool {
        self == Outcome::WillWatch
    }
}

impl From<bool> for Outcome {
    fn from(will_watch: bool) -> Self {
        if will_watch {
            Outcome::WillWatch
        } else {
            Outcome::WontWatch
        }
    }
}

// =============================================================================
// MovieFeatures
// =============================================================================

/// The five categorical attributes describing one movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieFeatures {
    pub genre: Genre,
    pub age_rating: AgeRating,
    pub length: Length,
    pub era: Era,
    pub user_rating: UserRating,
}

impl MovieFeatures {
    pub fn new(
        genre: Genre,
        age_rating: AgeRating,
        length: Length,
        era: Era,
        user_rating: UserRating,
    ) -> Self {
        Self {
            genre,
            age_rating,
            length,
            era,
            user_rating,
        }
    }

    /// Encode as the raw classifier row
    pub fn codes(&self) -> FeatureRow {
        [
            self.genre.code(),
            self.age_rating.code(),
            self.length.code(),
            self.era.code(),
            self.user_rating.code(),
        ]
    }

    /// Decode a raw row, failing on the first code that is not a member
    /// of its axis
    pub fn from_codes(row: FeatureRow) -> Result<Self> {
        let [genre, age_rating, length, era, user_rating] = row;
        Ok(Self {
            genre: Genre::try_from(genre)?,
            age_rating: AgeRating::try_from(age_rating)?,
            length: Length::try_from(length)?,
            era: Era::try_from(era)?,
            user_rating: UserRating::try_from(user_rating)?,
        })
    }
}

/// The selection the front end starts with: Action, PG-13, Medium, Modern, Good
impl Default for MovieFeatures {
    fn default() -> Self {
        Self::new(
            Genre::Action,
            AgeRating::Pg13,
            Length::Medium,
            Era::Modern,
            UserRating::Good,
        )
    }
}

impl fmt::Display for MovieFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} • {} • {} • {} • {}",
            self.genre, self.age_rating, self.length, self.era, self.user_rating
        )
    }
}
