//! Line, word and character level text diffing, with three renderers over the result:
//! line-numbered records, a unified patch, and an HTML fragment.
//!
//! ```
//! use geowidgets::diff::{compute_diff, diff_records, unified_diff, DiffMode, UnifiedOptions};
//!
//! let diffs = compute_diff("a\nb\nc", "a\nx\nc", DiffMode::Line);
//! let records = diff_records(&diffs);
//! assert_eq!(records.len(), 4);
//!
//! let patch = unified_diff(&records, &UnifiedOptions::default());
//! assert!(patch.contains("@@ -2,1 +2,1 @@"));
//! ```

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeoWidgetsError, Result};

mod cleanup;
mod compute;
mod html;
mod records;
mod unified;

pub use compute::compute_diff;
pub use html::diff_html;
pub use records::{diff_records, DiffRecord, DiffStats, RecordKind};
pub use unified::{unified_diff, UnifiedOptions};

/// The kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Insert,
    Delete,
    Equal,
}

/// One edit operation and the text it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub op: DiffOp,
    pub text: String,
}

impl Diff {
    pub fn new(op: DiffOp, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }
}

/// The granularity of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    #[default]
    Line,
    Word,
    Char,
}

impl Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiffMode::Line => "line",
            DiffMode::Word => "word",
            DiffMode::Char => "char",
        };
        f.write_str(name)
    }
}

impl FromStr for DiffMode {
    type Err = GeoWidgetsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(DiffMode::Line),
            "word" => Ok(DiffMode::Word),
            "char" => Ok(DiffMode::Char),
            other => Err(GeoWidgetsError::InvalidInput(format!(
                "unknown diff mode '{other}', expected line, word or char"
            ))),
        }
    }
}

/// Reject a comparison where there is nothing on either side.
///
/// [`compute_diff`] itself accepts empty input; this is for callers that want to tell the user
/// instead of showing an empty result.
pub fn ensure_inputs(old: &str, new: &str) -> Result<()> {
    if old.is_empty() && new.is_empty() {
        Err(GeoWidgetsError::EmptyInput)
    } else {
        Ok(())
    }
}

/// Rebuild the old (`DiffOp::Delete` and `DiffOp::Equal`) or new (`DiffOp::Insert` and
/// `DiffOp::Equal`) text from a diff.
pub fn apply(diffs: &[Diff], side: Side) -> String {
    let skip = match side {
        Side::Old => DiffOp::Insert,
        Side::New => DiffOp::Delete,
    };
    diffs
        .iter()
        .filter(|diff| diff.op != skip)
        .map(|diff| diff.text.as_str())
        .collect()
}

/// Which input of a diff to reconstruct with [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}
