use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

use crate::position::{Position, Span};
use crate::tokenize::token::{FundamentalType, Token, TAB};

pub const DEFAULT_TAB_WIDTH: usize = 4;

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_text(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits text into fundamental tokens. Never fails: every character belongs to exactly one
/// token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<Chars<'a>>,
    pos: Position,
    tab_width: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_tab_width(text, DEFAULT_TAB_WIDTH)
    }

    pub fn with_tab_width(text: &'a str, tab_width: usize) -> Self {
        Self {
            text,
            chars: text.chars().peekable(),
            pos: Default::default(),
            tab_width,
        }
    }

    /// Returns the position of the immediately following character.
    pub fn pos(&self) -> Position {
        self.pos
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;

        self.pos.byte += c.len_utf8();
        self.pos.char += if c == TAB { self.tab_width } else { 1 };

        Some(c)
    }

    fn bump_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while self.chars.peek().is_some_and(|&c| predicate(c)) {
            self.bump();
        }
    }

    fn scan_line_break(&mut self, first: char) {
        if first == '\r' && self.chars.peek() == Some(&'\n') {
            self.bump();
        }

        self.pos.line += 1;
    }

    fn scan(&mut self, first: char) -> FundamentalType {
        match first {
            c if is_line_break(c) => {
                self.scan_line_break(c);

                FundamentalType::LineBreak
            }

            c if c.is_whitespace() => {
                self.bump_while(|c| c.is_whitespace() && !is_line_break(c));

                FundamentalType::Whitespace
            }

            // a digit-led run stops at the first letter so numeric rules can end between them
            c if c.is_ascii_digit() => {
                self.bump_while(|c| c.is_ascii_digit() || c == '_');

                FundamentalType::Text
            }

            c if is_text(c) => {
                self.bump_while(is_text);

                FundamentalType::Text
            }

            _ => FundamentalType::Symbol,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let first = self.bump()?;
        let ty = self.scan(first);

        debug_assert!(self.text.is_char_boundary(self.pos.byte));

        Some(Token {
            ty,
            span: Span {
                start,
                end: self.pos,
            },
        })
    }
}

impl FusedIterator for Lexer<'_> {}
