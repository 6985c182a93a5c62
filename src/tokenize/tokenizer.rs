use std::cell::Cell;
use std::fmt;

use crate::position::Position;
use crate::tokenize::cursor::Cursor;
use crate::tokenize::lexer::{Lexer, DEFAULT_TAB_WIDTH};
use crate::tokenize::tag::{PrototypeRole, SyntaxRole};
use crate::tokenize::token::Token;

/// Owns a text, its token table and the two per-token tag tables.
///
/// The tags are stored in cells so that any number of [`Cursor`]s can write them while sharing
/// the tokenizer. This makes a `Tokenizer` `!Sync`: it belongs to a single parse job.
pub struct Tokenizer {
    text: String,
    tokens: Vec<Token>,
    prototype_roles: Vec<Cell<PrototypeRole>>,
    syntax_roles: Vec<Cell<SyntaxRole>>,
    end: Position,
    tab_width: usize,
}

impl Tokenizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_tab_width(text, DEFAULT_TAB_WIDTH)
    }

    pub fn with_tab_width(text: impl Into<String>, tab_width: usize) -> Self {
        let text = text.into();
        let mut lexer = Lexer::with_tab_width(&text, tab_width);
        let tokens: Vec<Token> = lexer.by_ref().collect();
        let end = lexer.pos();

        Self {
            prototype_roles: tokens.iter().map(|_| Cell::default()).collect(),
            syntax_roles: tokens.iter().map(|_| Cell::default()).collect(),
            tokens,
            end,
            tab_width,
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> Cursor<'_> {
        Cursor::new(self, 0)
    }

    /// Returns the one-past-end cursor.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(self, self.tokens.len())
    }

    pub fn cursor_at(&self, index: usize) -> Cursor<'_> {
        Cursor::new(self, index)
    }

    /// Returns the position where the token at `index` starts, or the end of the text for the
    /// one-past-end index.
    pub fn position_of(&self, index: usize) -> Position {
        self.tokens
            .get(index)
            .map(|token| token.span.start)
            .unwrap_or(self.end)
    }

    pub fn token_text(&self, index: usize) -> &str {
        self.tokens
            .get(index)
            .map(|token| &self.text[token.byte_range()])
            .unwrap_or("")
    }

    /// Returns the text covered by the tokens in `start..end`.
    pub fn text_between(&self, start: usize, end: usize) -> &str {
        let start = self.position_of(start).byte;
        let end = self.position_of(end).byte;

        &self.text[start..end.max(start)]
    }

    pub fn prototype_role(&self, index: usize) -> PrototypeRole {
        self.prototype_roles
            .get(index)
            .map(Cell::get)
            .unwrap_or_default()
    }

    pub fn syntax_role(&self, index: usize) -> SyntaxRole {
        self.syntax_roles
            .get(index)
            .map(Cell::get)
            .unwrap_or_default()
    }

    pub(crate) fn set_prototype_role(&self, index: usize, role: PrototypeRole) {
        self.prototype_roles[index].set(role);
    }

    pub(crate) fn set_syntax_role(&self, index: usize, role: SyntaxRole) {
        self.syntax_roles[index].set(role);
    }

    pub fn reset_prototype_roles(&self, start: usize, end: usize) {
        let end = end.min(self.tokens.len());

        for role in &self.prototype_roles[start.min(end)..end] {
            role.set(PrototypeRole::Null);
        }
    }

    pub fn reset_syntax_roles(&self, start: usize, end: usize) {
        let end = end.min(self.tokens.len());

        for role in &self.syntax_roles[start.min(end)..end] {
            role.set(SyntaxRole::Null);
        }
    }

    pub fn prototype_roles(&self) -> Vec<PrototypeRole> {
        self.prototype_roles.iter().map(Cell::get).collect()
    }

    pub fn syntax_roles(&self) -> Vec<SyntaxRole> {
        self.syntax_roles.iter().map(Cell::get).collect()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("text", &self.text)
            .field("tokens", &self.tokens.len())
            .finish()
    }
}
