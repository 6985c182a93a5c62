use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use crate::position::Position;
use crate::tokenize::tag::{PrototypeRole, SyntaxRole};
use crate::tokenize::token::{FundamentalType, Token};
use crate::tokenize::tokenizer::Tokenizer;

/// A position in a [`Tokenizer`]'s token table.
///
/// Cursors are `Copy`: a copy is an independent position, so a matcher can advance a copy and
/// simply drop it when the match fails. The index never exceeds the one-past-end sentinel.
#[derive(Clone, Copy)]
pub struct Cursor<'t> {
    tokenizer: &'t Tokenizer,
    index: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokenizer: &'t Tokenizer, index: usize) -> Self {
        assert!(
            index <= tokenizer.len(),
            "cursor index {} is past the end of a {}-token table",
            index,
            tokenizer.len()
        );

        Self { tokenizer, index }
    }

    pub fn tokenizer(&self) -> &'t Tokenizer {
        self.tokenizer
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_in_bounds(&self) -> bool {
        self.index < self.tokenizer.len()
    }

    pub fn at_end(&self) -> bool {
        !self.is_in_bounds()
    }

    pub fn token(&self) -> Option<&'t Token> {
        self.tokenizer.tokens().get(self.index)
    }

    pub fn fundamental_type(&self) -> Option<FundamentalType> {
        self.token().map(|token| token.ty)
    }

    pub fn is_whitespace(&self) -> bool {
        self.fundamental_type()
            .is_some_and(FundamentalType::is_whitespace)
    }

    pub fn is_text(&self) -> bool {
        self.fundamental_type() == Some(FundamentalType::Text)
    }

    /// Returns the current token's text, or an empty string at the end.
    pub fn text(&self) -> &'t str {
        self.tokenizer.token_text(self.index)
    }

    /// Returns the first character of the current token.
    pub fn char(&self) -> Option<char> {
        self.text().chars().next()
    }

    /// Returns `true` if the current token is a symbol equal to `c`.
    pub fn is_symbol(&self, c: char) -> bool {
        self.fundamental_type() == Some(FundamentalType::Symbol) && self.char() == Some(c)
    }

    pub fn position(&self) -> Position {
        self.tokenizer.position_of(self.index)
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn char_number(&self) -> usize {
        self.position().char
    }

    /// Moves to the next token. Returns `false` if the cursor was already at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if self.at_end() {
            return false;
        }

        self.index += 1;

        true
    }

    /// Moves forward by `n` tokens, stopping at the end.
    pub fn advance(&mut self, n: usize) {
        self.index = (self.index + n).min(self.tokenizer.len());
    }

    /// Moves to the previous token. Returns `false` if the cursor was at the first token.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }

        self.index -= 1;

        true
    }

    /// Moves forward by `n` characters, crossing as many tokens as needed.
    ///
    /// Panics if the move would end inside a token or past the end of the text.
    pub fn advance_by_chars(&mut self, n: usize) {
        let target = self.char_number() + n;

        while self.is_in_bounds() && self.char_number() < target {
            self.index += 1;
        }

        assert_eq!(
            self.char_number(),
            target,
            "advancing by {} characters does not end on a token boundary",
            n
        );
    }

    /// Returns the text from the current token to the end.
    pub fn remaining_text(&self) -> &'t str {
        &self.tokenizer.text()[self.position().byte..]
    }

    fn matched_token_count(&self, text: &str, ignore_case: bool) -> Option<usize> {
        let remaining = self.remaining_text();
        let prefix = remaining.get(..text.len())?;

        let equal = if ignore_case {
            prefix.eq_ignore_ascii_case(text)
        } else {
            prefix == text
        };

        if !equal || text.is_empty() {
            return None;
        }

        // the match must end on a token boundary
        let end_byte = self.position().byte + text.len();
        let mut lookahead = *self;

        while lookahead.is_in_bounds() && lookahead.position().byte < end_byte {
            lookahead.index += 1;
        }

        (lookahead.position().byte == end_byte).then_some(lookahead.index - self.index)
    }

    /// Returns `true` if the text starting at the cursor begins with `text` and `text` ends on a
    /// token boundary. The match may span several tokens, as in `(*`.
    pub fn matches_text(&self, text: &str) -> bool {
        self.matched_token_count(text, false).is_some()
    }

    pub fn matches_text_ignore_case(&self, text: &str) -> bool {
        self.matched_token_count(text, true).is_some()
    }

    /// Returns `true` if the current token is exactly `text`.
    pub fn matches_token(&self, text: &str) -> bool {
        self.is_in_bounds() && self.text() == text
    }

    pub fn matches_token_ignore_case(&self, text: &str) -> bool {
        self.is_in_bounds() && self.text().eq_ignore_ascii_case(text)
    }

    /// Advances past `text` if [`Cursor::matches_text`] holds.
    pub fn try_skip_text(&mut self, text: &str) -> bool {
        match self.matched_token_count(text, false) {
            Some(count) => {
                self.index += count;

                true
            }

            None => false,
        }
    }

    /// Skips whitespace and line break tokens (but not comments).
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.index;

        while self.is_whitespace() {
            self.index += 1;
        }

        self.index != start
    }

    /// Returns the closest preceding token that isn't whitespace.
    pub fn previous_significant(&self) -> Option<Cursor<'t>> {
        let mut lookbehind = *self;

        while lookbehind.previous() {
            if !lookbehind.is_whitespace() {
                return Some(lookbehind);
            }
        }

        None
    }

    pub fn prototype_role(&self) -> PrototypeRole {
        self.tokenizer.prototype_role(self.index)
    }

    pub fn syntax_role(&self) -> SyntaxRole {
        self.tokenizer.syntax_role(self.index)
    }

    pub fn set_prototype_role(&self, role: PrototypeRole) {
        if self.is_in_bounds() {
            self.tokenizer.set_prototype_role(self.index, role);
        }
    }

    pub fn set_syntax_role(&self, role: SyntaxRole) {
        if self.is_in_bounds() {
            self.tokenizer.set_syntax_role(self.index, role);
        }
    }

    /// Tags every token from this cursor up to, but not including, `end`.
    pub fn set_prototype_role_between(&self, end: &Cursor<'t>, role: PrototypeRole) {
        for index in self.index..end.index.min(self.tokenizer.len()) {
            self.tokenizer.set_prototype_role(index, role);
        }
    }

    pub fn set_syntax_role_between(&self, end: &Cursor<'t>, role: SyntaxRole) {
        for index in self.index..end.index.min(self.tokenizer.len()) {
            self.tokenizer.set_syntax_role(index, role);
        }
    }

    fn ordered_indices(&self, other: &Cursor<'t>) -> (usize, usize) {
        (self.index.min(other.index), self.index.max(other.index))
    }

    /// Clears the prototype roles between this cursor and `other`, in whichever order they are.
    pub fn reset_prototype_roles_between(&self, other: &Cursor<'t>) {
        let (start, end) = self.ordered_indices(other);

        self.tokenizer.reset_prototype_roles(start, end);
    }

    pub fn reset_syntax_roles_between(&self, other: &Cursor<'t>) {
        let (start, end) = self.ordered_indices(other);

        self.tokenizer.reset_syntax_roles(start, end);
    }

    pub fn text_between(&self, end: &Cursor<'t>) -> &'t str {
        self.tokenizer.text_between(self.index, end.index)
    }

    /// Returns the char width from this cursor to `end`.
    pub fn chars_between(&self, end: &Cursor<'t>) -> usize {
        end.char_number().saturating_sub(self.char_number())
    }

    /// Narrows `self..end` so it neither starts nor ends with whitespace tokens.
    pub fn trimmed(&self, end: &Cursor<'t>) -> (Cursor<'t>, Cursor<'t>) {
        let mut start = *self;
        let mut end = *end;

        while start < end && start.is_whitespace() {
            start.index += 1;
        }

        while end > start {
            let mut before = end;
            before.index -= 1;

            if !before.is_whitespace() {
                break;
            }

            end = before;
        }

        (start, end)
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tokenizer, other.tokenizer) && self.index == other.index
    }
}

impl Eq for Cursor<'_> {}

impl PartialOrd for Cursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ptr::eq(self.tokenizer, other.tokenizer).then(|| self.index.cmp(&other.index))
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("token", &self.text())
            .finish()
    }
}
