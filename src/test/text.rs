pub(crate) const OLD: &str = "a\nb\nc";
pub(crate) const NEW: &str = "a\nx\nc";

pub(crate) const OLD_LONG: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";
pub(crate) const NEW_LONG: &str =
    "one\ntwo\nTHREE\nfour\nfive\nsix\nseven\neight\nnine\nten\neleven\n";
