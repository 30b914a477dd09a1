//! Indentation classification.
//!
//! Leading tabs and spaces are converted to a space count (tab = 4) and the
//! delta against the enclosing container's indent picks one of seven classes.
//! Classes at or below [`IndentClass::NoIndent`] unwind the nesting stack.

use super::scan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndentClass {
    /// Delta <= -8: leaves the enclosing quote.
    Unquote,
    /// Delta <= -4: leaves the enclosing (sub-)list.
    Unlist,
    /// Delta <= -2: leaves the current block level.
    Discontinue,
    /// Delta in (-2, 2): stays at the current level.
    NoIndent,
    /// Delta >= 2: continues the previous block.
    Continue,
    /// Delta >= 4: sub-list indent.
    List,
    /// Delta >= 8: opens a new quote container.
    Quote,
}

impl IndentClass {
    /// Classes that trigger unwinding the nesting stack.
    pub(crate) fn unwinds(self) -> bool {
        matches!(
            self,
            IndentClass::Unquote
                | IndentClass::Unlist
                | IndentClass::Discontinue
                | IndentClass::NoIndent
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Indent {
    /// Number of leading indent characters (tabs count once here).
    pub(crate) char_count: usize,
    /// Indent width in spaces (tab = 4).
    pub(crate) spaces: usize,
    pub(crate) class: IndentClass,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum LineStart {
    /// The line holds nothing but whitespace; `end_of_line` is its `\n` (or
    /// the end of input).
    Empty { end_of_line: usize },
    Block(Indent),
}

pub(crate) fn detect_indent(src: &[char], i: usize, parent_indent: usize) -> LineStart {
    if scan::at(src, i) == Some('\n') {
        return LineStart::Empty { end_of_line: i };
    }

    let mut char_count = 0;
    let mut spaces = 0;
    let mut search = i;

    while search < src.len() {
        match src[search] {
            '\n' => return LineStart::Empty { end_of_line: search },
            '\t' => {
                char_count += 1;
                spaces += 4;
            }
            ' ' => {
                char_count += 1;
                spaces += 1;
            }
            _ => break,
        }
        search += 1;
    }

    let delta = spaces as isize - parent_indent as isize;
    let class = if delta >= 8 {
        IndentClass::Quote
    } else if delta >= 4 {
        IndentClass::List
    } else if delta >= 2 {
        IndentClass::Continue
    } else if delta <= -8 {
        IndentClass::Unquote
    } else if delta <= -4 {
        IndentClass::Unlist
    } else if delta <= -2 {
        IndentClass::Discontinue
    } else {
        IndentClass::NoIndent
    };

    LineStart::Block(Indent { char_count, spaces, class })
}
