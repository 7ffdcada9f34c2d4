use std::fmt::Write;
use std::ops::Range;

use serde::Deserialize;

use crate::diff::{DiffRecord, RecordKind};

/// Options for [`unified_diff`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnifiedOptions {
    /// Name printed after `---`.
    pub old_label: String,
    /// Name printed after `+++`.
    pub new_label: String,
    /// Unchanged lines to show on each side of a change.
    pub context: usize,
}

impl Default for UnifiedOptions {
    fn default() -> Self {
        Self {
            old_label: "original".to_string(),
            new_label: "modified".to_string(),
            context: 0,
        }
    }
}

/// Group changed records, widened by `context`, into record ranges. Ranges that touch or
/// overlap are merged.
fn hunk_ranges(records: &[DiffRecord], context: usize) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = vec![];
    let changed = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.kind != RecordKind::Unchanged)
        .map(|(idx, _)| idx);

    for idx in changed {
        let lo = idx.saturating_sub(context);
        let hi = (idx + context + 1).min(records.len());
        match ranges.last_mut() {
            Some(last) if lo <= last.end => last.end = last.end.max(hi),
            _ => ranges.push(lo..hi),
        }
    }
    ranges
}

/// `start,count` for one side of a hunk header. An empty side names the line before it.
fn side_header(before: usize, count: usize) -> String {
    if count == 0 {
        format!("{before},0")
    } else {
        format!("{},{count}", before + 1)
    }
}

/// Render records as a unified diff.
pub fn unified_diff(records: &[DiffRecord], options: &UnifiedOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "--- {}", options.old_label);
    let _ = writeln!(out, "+++ {}", options.new_label);

    // Lines of each side that come before the current hunk.
    let (mut old_before, mut new_before) = (0, 0);
    let mut cursor = 0;
    for range in hunk_ranges(records, options.context) {
        for record in &records[cursor..range.start] {
            old_before += usize::from(record.old_line.is_some());
            new_before += usize::from(record.new_line.is_some());
        }
        cursor = range.end;
        let hunk = &records[range];
        let old_count = hunk.iter().filter(|record| record.old_line.is_some()).count();
        let new_count = hunk.iter().filter(|record| record.new_line.is_some()).count();

        let _ = writeln!(
            out,
            "@@ -{} +{} @@",
            side_header(old_before, old_count),
            side_header(new_before, new_count)
        );
        for record in hunk {
            let prefix = match record.kind {
                RecordKind::Added => '+',
                RecordKind::Removed => '-',
                RecordKind::Unchanged => ' ',
            };
            let _ = writeln!(out, "{prefix}{}", record.text);
        }
        old_before += old_count;
        new_before += new_count;
    }
    out
}
