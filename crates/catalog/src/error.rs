//! Error types for the catalog crate.
//!
//! Every lookup in this crate is over a closed set of codes, so the only
//! thing that can go wrong is a caller presenting a code (or a name) that
//! is not part of an axis's table.

use thiserror::Error;

use crate::types::Axis;

/// Errors that can occur when mapping raw codes or names to categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A raw integer code is not a key of the axis's table
    #[error("Unknown code {code} for {axis}")]
    UnknownCode { axis: Axis, code: u8 },

    /// A textual value matched neither a code nor a label of the axis
    #[error("Unknown value '{value}' for {axis}")]
    UnknownLabel { axis: Axis, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
