use std::hash::Hash;

use indexmap::IndexSet;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use tracing::debug;

use crate::diff::cleanup::{cleanup_merge, cleanup_semantic};
use crate::diff::{Diff, DiffMode, DiffOp};

/// Compare two texts at the given granularity.
///
/// Empty input is legal. Two empty texts give an empty diff.
pub fn compute_diff(old: &str, new: &str, mode: DiffMode) -> Vec<Diff> {
    let diffs = match mode {
        DiffMode::Line => diff_lines(old, new),
        DiffMode::Word => {
            let mut diffs = diff_chars(old, new);
            cleanup_semantic(&mut diffs);
            diffs
        }
        DiffMode::Char => diff_chars(old, new),
    };
    debug!(
        %mode,
        old_len = old.len(),
        new_len = new.len(),
        ops = diffs.len(),
        "computed diff"
    );
    diffs
}

/// Run Myers over two token slices and render each run of tokens back to text.
fn diff_slices<T, F>(old: &[T], new: &[T], render: F) -> Vec<Diff>
where
    T: Eq + Hash + Ord,
    F: Fn(&[T]) -> String,
{
    let mut diffs = vec![];
    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => diffs.push(Diff::new(DiffOp::Equal, render(&old[old_range]))),
            DiffTag::Delete => diffs.push(Diff::new(DiffOp::Delete, render(&old[old_range]))),
            DiffTag::Insert => diffs.push(Diff::new(DiffOp::Insert, render(&new[new_range]))),
            DiffTag::Replace => {
                diffs.push(Diff::new(DiffOp::Delete, render(&old[old_range])));
                diffs.push(Diff::new(DiffOp::Insert, render(&new[new_range])));
            }
        }
    }
    cleanup_merge(&mut diffs);
    diffs
}

fn diff_chars(old: &str, new: &str) -> Vec<Diff> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    diff_slices(&old, &new, |chars| chars.iter().collect())
}

/// Lines of `text`, each keeping its trailing `\n`, interned as indexes into `lines`.
fn encode_lines<'a>(text: &'a str, lines: &mut IndexSet<&'a str>) -> Vec<usize> {
    text.split_inclusive('\n')
        .map(|line| lines.insert_full(line).0)
        .collect()
}

/// Every distinct line becomes a single token, so the token diff is a line diff.
fn diff_lines(old: &str, new: &str) -> Vec<Diff> {
    let mut lines = IndexSet::new();
    let old = encode_lines(old, &mut lines);
    let new = encode_lines(new, &mut lines);
    diff_slices(&old, &new, |tokens| {
        tokens
            .iter()
            .filter_map(|&idx| lines.get_index(idx).copied())
            .collect()
    })
}
