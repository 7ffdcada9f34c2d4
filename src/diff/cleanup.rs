use std::mem;

use crate::diff::{Diff, DiffOp};

fn flush_edits(merged: &mut Vec<Diff>, deleted: &mut String, inserted: &mut String) {
    if !deleted.is_empty() {
        merged.push(Diff::new(DiffOp::Delete, mem::take(deleted)));
    }
    if !inserted.is_empty() {
        merged.push(Diff::new(DiffOp::Insert, mem::take(inserted)));
    }
}

/// Join adjacent operations of the same kind and drop empty ones.
///
/// Between two equalities, all deletions are combined into one `Delete` followed by all
/// insertions combined into one `Insert`.
pub(crate) fn cleanup_merge(diffs: &mut Vec<Diff>) {
    let mut merged: Vec<Diff> = Vec::with_capacity(diffs.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for diff in diffs.drain(..) {
        match diff.op {
            DiffOp::Delete => deleted.push_str(&diff.text),
            DiffOp::Insert => inserted.push_str(&diff.text),
            DiffOp::Equal => {
                flush_edits(&mut merged, &mut deleted, &mut inserted);
                if diff.text.is_empty() {
                    continue;
                }
                match merged.last_mut() {
                    Some(last) if last.op == DiffOp::Equal => last.text.push_str(&diff.text),
                    _ => merged.push(diff),
                }
            }
        }
    }
    flush_edits(&mut merged, &mut deleted, &mut inserted);

    *diffs = merged;
}

/// Turn short equalities that sit between edits into edits, so that a change reads as one
/// chunk rather than a scatter of single characters.
///
/// An equality is eliminated when it is no longer than the larger of the insertions or
/// deletions on each side of it. After an elimination the scan resumes from the equality
/// before the previous one, since that one may now qualify too.
pub(crate) fn cleanup_semantic(diffs: &mut Vec<Diff>) {
    let mut changed = false;
    // Indexes of the equalities seen so far.
    let mut equalities: Vec<usize> = vec![];
    // Length in chars of the last equality, while it is still a candidate.
    let mut last_equality: Option<usize> = None;
    let (mut inserted_before, mut deleted_before) = (0, 0);
    let (mut inserted_after, mut deleted_after) = (0, 0);

    let mut pointer = 0;
    while pointer < diffs.len() {
        let len = diffs[pointer].text.chars().count();
        match diffs[pointer].op {
            DiffOp::Equal => {
                equalities.push(pointer);
                inserted_before = inserted_after;
                deleted_before = deleted_after;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = Some(len);
                pointer += 1;
                continue;
            }
            DiffOp::Insert => inserted_after += len,
            DiffOp::Delete => deleted_after += len,
        }

        let eliminate = last_equality.is_some_and(|equality| {
            equality <= inserted_before.max(deleted_before)
                && equality <= inserted_after.max(deleted_after)
        });
        if let Some(idx) = eliminate.then(|| equalities.pop()).flatten() {
            let text = diffs[idx].text.clone();
            diffs[idx].op = DiffOp::Insert;
            diffs.insert(idx, Diff::new(DiffOp::Delete, text));
            // The previous equality has to be looked at again.
            equalities.pop();

            inserted_before = 0;
            deleted_before = 0;
            inserted_after = 0;
            deleted_after = 0;
            last_equality = None;
            changed = true;
            pointer = equalities.last().map_or(0, |&idx| idx + 1);
            continue;
        }
        pointer += 1;
    }

    if changed {
        cleanup_merge(diffs);
    }
}
