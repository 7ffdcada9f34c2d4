use crate::diff::{Diff, DiffOp};

fn class_name(op: DiffOp) -> &'static str {
    match op {
        DiffOp::Insert => "diff-added",
        DiffOp::Delete => "diff-removed",
        DiffOp::Equal => "diff-unchanged",
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            c => out.push(c),
        }
    }
}

/// Render a diff as an HTML fragment, one `<span>` per operation.
pub fn diff_html(diffs: &[Diff]) -> String {
    let mut out = String::new();
    for diff in diffs {
        out.push_str("<span class=\"");
        out.push_str(class_name(diff.op));
        out.push_str("\">");
        push_escaped(&mut out, &diff.text);
        out.push_str("</span>");
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diff::{compute_diff, DiffMode};
    use crate::test::text::{NEW, OLD};

    #[test]
    fn spans() {
        assert_eq!(
            diff_html(&compute_diff(OLD, NEW, DiffMode::Line)),
            "<span class=\"diff-unchanged\">a<br></span>\
             <span class=\"diff-removed\">b<br></span>\
             <span class=\"diff-added\">x<br></span>\
             <span class=\"diff-unchanged\">c</span>"
        );
    }

    #[test]
    fn escapes_markup() {
        let html = diff_html(&[Diff::new(DiffOp::Insert, "<b>fish & chips</b>")]);
        assert_eq!(
            html,
            "<span class=\"diff-added\">&lt;b&gt;fish &amp; chips&lt;/b&gt;</span>"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(diff_html(&[]), "");
    }
}
