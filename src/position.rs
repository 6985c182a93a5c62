use serde::Serialize;

/// A location in a source text.
///
/// `char` counts Unicode scalar values from the start of the text, with tabs expanded to the
/// tokenizer's tab width. It is what column widths are measured in.
#[derive(Serialize, Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub byte: usize,
    pub char: usize,
    pub line: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            byte: 0,
            char: 0,
            line: 1,
        }
    }
}

/// A span between two positions, exclusive on the end.
#[derive(Serialize, Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}
