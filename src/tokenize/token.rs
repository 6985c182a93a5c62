use std::fmt::{self, Display};
use std::ops::Range;

use serde::Serialize;

use crate::position::Span;

pub const TAB: char = '\t';

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundamentalType {
    /// Letters, digits, underscores and non-ASCII alphanumerics.
    Text,
    /// A single punctuation character.
    Symbol,
    /// A run of spaces, tabs and other non-newline whitespace.
    Whitespace,
    /// `\n`, `\r\n` or `\r`.
    LineBreak,
}

impl FundamentalType {
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineBreak)
    }
}

impl Display for FundamentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Text => "text",
                Self::Symbol => "symbol",
                Self::Whitespace => "whitespace",
                Self::LineBreak => "line break",
            }
        )
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub ty: FundamentalType,
    pub span: Span,
}

impl Token {
    pub fn byte_range(&self) -> Range<usize> {
        self.span.start.byte..self.span.end.byte
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }
}
