//! Puzzle file loading
//!
//! Puzzles are JSON documents listing their groups:
//!
//! ```json
//! {
//!   "groups": [
//!     { "category": "FRUIT", "words": ["APPLE", "PEAR", "PLUM", "FIG"], "color": "#f9df6d" }
//!   ]
//! }
//! ```
//!
//! Every file goes through [`Catalog::new`], so a malformed puzzle is rejected
//! before any game starts.

use super::{Catalog, CatalogError};
use crate::core::Group;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct PuzzleFile {
    groups: Vec<Group>,
}

/// Parse and validate a puzzle from JSON text
///
/// # Errors
/// Returns `CatalogError::Parse` for malformed JSON, or the validation error
/// from [`Catalog::new`].
///
/// # Examples
/// ```
/// use connections::catalog::loader::from_json;
///
/// assert!(from_json(r#"{"groups": []}"#).is_err());
/// ```
pub fn from_json(json: &str) -> Result<Catalog, CatalogError> {
    let file: PuzzleFile = serde_json::from_str(json)?;
    Catalog::new(file.groups)
}

/// Load and validate a puzzle file
///
/// # Errors
/// Returns `CatalogError::Io` if the file cannot be read, otherwise the same
/// errors as [`from_json`].
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let catalog = from_json(&content)?;

    tracing::debug!(path = %path.display(), "loaded puzzle file");
    Ok(catalog)
}

/// Serialize a catalog back to the puzzle file format
///
/// # Errors
/// Returns `CatalogError::Parse` if serialization fails.
pub fn to_json(catalog: &Catalog) -> Result<String, CatalogError> {
    let file = PuzzleFile {
        groups: catalog.groups().to_vec(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}
