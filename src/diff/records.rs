use serde::Serialize;

use crate::diff::{Diff, DiffOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Added,
    Removed,
    Unchanged,
}

/// One line of a rendered diff.
///
/// Added lines carry only `new_line`, removed lines only `old_line`, unchanged lines both.
/// Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    pub kind: RecordKind,
    pub text: String,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DiffRecord {
    pub fn added(text: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: RecordKind::Added,
            text: text.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(text: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: RecordKind::Removed,
            text: text.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn unchanged(text: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: RecordKind::Unchanged,
            text: text.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }
}

/// Split the text of one operation into lines. A trailing newline ends the last line rather
/// than starting an empty one.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let has_lines = !text.is_empty();
    body.split('\n').filter(move |_| has_lines)
}

/// Split every operation into lines and number them on the old and new side.
pub fn diff_records(diffs: &[Diff]) -> Vec<DiffRecord> {
    let mut records = vec![];
    let mut old_line = 1;
    let mut new_line = 1;

    for diff in diffs {
        for line in split_lines(&diff.text) {
            let record = match diff.op {
                DiffOp::Insert => {
                    new_line += 1;
                    DiffRecord::added(line, new_line - 1)
                }
                DiffOp::Delete => {
                    old_line += 1;
                    DiffRecord::removed(line, old_line - 1)
                }
                DiffOp::Equal => {
                    old_line += 1;
                    new_line += 1;
                    DiffRecord::unchanged(line, old_line - 1, new_line - 1)
                }
            };
            records.push(record);
        }
    }
    records
}

/// Counts of added, removed and unchanged lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_records(records: &[DiffRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut stats, record| {
                match record.kind {
                    RecordKind::Added => stats.added += 1,
                    RecordKind::Removed => stats.removed += 1,
                    RecordKind::Unchanged => stats.unchanged += 1,
                }
                stats
            })
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}
