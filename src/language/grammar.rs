use crate::language::mode::{attempt, ParseMode};
use crate::tokenize::{Cursor, FundamentalType, SyntaxRole};

/// The lexical conventions of a language.
#[derive(Debug)]
pub struct Syntax {
    pub line_comments: &'static [&'static str],
    pub block_comments: &'static [(&'static str, &'static str)],
    pub quotes: &'static [char],
    pub escape: Option<char>,
    /// Pairs the generic skip treats as nesting blocks.
    pub brackets: &'static [(char, char)],
    /// Lowercase when the language is case-insensitive.
    pub keywords: &'static phf::Set<&'static str>,
    pub built_in_types: &'static phf::Set<&'static str>,
    pub case_sensitive: bool,
}

impl Syntax {
    fn contains(&self, set: &phf::Set<&'static str>, word: &str) -> bool {
        if self.case_sensitive {
            set.contains(word)
        } else {
            set.contains(word.to_ascii_lowercase().as_str())
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.contains(self.keywords, word)
    }

    pub fn is_built_in_type(&self, word: &str) -> bool {
        self.contains(self.built_in_types, word)
    }

    pub fn closing_bracket(&self, open: char) -> Option<char> {
        self.brackets
            .iter()
            .find(|&&(o, _)| o == open)
            .map(|&(_, close)| close)
    }
}

/// The shared matching helpers every language grammar is built from.
///
/// Every `try_to_skip_*` method follows one contract: on success it advances `cursor` past the
/// construct and tags it according to `mode`; on failure it leaves `cursor`, the tags and the
/// recorded elements exactly as they were.
pub trait Grammar {
    fn syntax(&self) -> &Syntax;

    fn is_keyword(&self, word: &str) -> bool {
        self.syntax().is_keyword(word)
    }

    fn matches_word(&self, cursor: &Cursor<'_>, word: &str) -> bool {
        if self.syntax().case_sensitive {
            cursor.matches_token(word)
        } else {
            cursor.matches_token_ignore_case(word)
        }
    }

    /// Skips `keyword` if it is the current token, tagging it as a keyword.
    fn try_to_skip_keyword(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
        keyword: &str,
    ) -> bool {
        if !cursor.is_text() || !self.matches_word(cursor, keyword) {
            return false;
        }

        let start = *cursor;
        cursor.next();
        mode.tag_syntax(&start, cursor, SyntaxRole::Keyword);

        true
    }

    /// Skips the first of `keywords` that is the current token and returns it.
    fn try_to_skip_any_keyword(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
        keywords: &[&'static str],
    ) -> Option<&'static str> {
        keywords
            .iter()
            .copied()
            .find(|keyword| self.try_to_skip_keyword(cursor, mode, keyword))
    }

    fn try_to_skip_line_comment(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        let Some(marker) = self
            .syntax()
            .line_comments
            .iter()
            .find(|marker| cursor.matches_text(marker))
        else {
            return false;
        };

        let start = *cursor;
        cursor.try_skip_text(marker);

        while cursor.is_in_bounds() && cursor.fundamental_type() != Some(FundamentalType::LineBreak)
        {
            cursor.next();
        }

        mode.tag_syntax(&start, cursor, SyntaxRole::Comment);

        true
    }

    /// Skips a block comment. An unterminated comment runs to the end of the text.
    fn try_to_skip_block_comment(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        let Some((open, close)) = self
            .syntax()
            .block_comments
            .iter()
            .find(|(open, _)| cursor.matches_text(open))
        else {
            return false;
        };

        let start = *cursor;
        cursor.try_skip_text(open);

        while cursor.is_in_bounds() && !cursor.try_skip_text(close) {
            cursor.next();
        }

        mode.tag_syntax(&start, cursor, SyntaxRole::Comment);

        true
    }

    fn try_to_skip_comment(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        self.try_to_skip_line_comment(cursor, mode) || self.try_to_skip_block_comment(cursor, mode)
    }

    /// Skips any mix of whitespace, line breaks and comments. Returns `true` if anything was
    /// skipped.
    fn try_to_skip_whitespace(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        let start = cursor.index();

        while cursor.skip_whitespace() || self.try_to_skip_comment(cursor, mode) {}

        cursor.index() != start
    }

    /// Skips a quoted string. Strings end at their closing quote or, if unterminated, at the end
    /// of the line.
    fn try_to_skip_string(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        let syntax = self.syntax();

        let Some(quote) = cursor
            .char()
            .filter(|&c| cursor.is_symbol(c) && syntax.quotes.contains(&c))
        else {
            return false;
        };

        let start = *cursor;
        cursor.next();

        while cursor.is_in_bounds() {
            match syntax.escape {
                Some(escape) if cursor.is_symbol(escape) => {
                    cursor.advance(2);

                    continue;
                }

                _ => {}
            }

            if cursor.is_symbol(quote) {
                cursor.next();

                break;
            }

            if cursor.fundamental_type() == Some(FundamentalType::LineBreak) {
                break;
            }

            cursor.next();
        }

        mode.tag_syntax(&start, cursor, SyntaxRole::String);

        true
    }

    /// Skips a C-style numeric literal: decimal, hex/binary/octal with a `0x`-like prefix,
    /// fractions, exponents and letter suffixes.
    fn try_to_skip_number(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            if !lookahead.char().is_some_and(|c| c.is_ascii_digit()) {
                return false;
            }

            lookahead.next();
            let mut end = *lookahead;

            let prefixed = start.text() == "0"
                && lookahead.is_text()
                && lookahead.text().len() > 1
                && matches!(lookahead.char(), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'));

            if prefixed {
                lookahead.next();
                end = *lookahead;
            } else {
                if lookahead.is_symbol('.') {
                    let mut fraction = *lookahead;
                    fraction.next();

                    if fraction.char().is_some_and(|c| c.is_ascii_digit()) {
                        fraction.next();
                        *lookahead = fraction;
                        end = fraction;
                    }
                }

                if lookahead.is_text() && matches!(lookahead.char(), Some('e' | 'E')) {
                    let mut exponent = *lookahead;
                    let marker = exponent.text();
                    exponent.next();

                    if marker.len() > 1 && marker[1..].chars().all(|c| c.is_ascii_digit()) {
                        end = exponent;
                    } else if marker.len() == 1
                        && (exponent.is_symbol('+') || exponent.is_symbol('-'))
                    {
                        exponent.next();

                        if exponent.char().is_some_and(|c| c.is_ascii_digit()) {
                            exponent.next();
                            end = exponent;
                        }
                    }

                    *lookahead = end;
                }
            }

            // type suffixes such as `u`, `UL` or `f`
            if *lookahead == end
                && lookahead.is_text()
                && lookahead
                    .text()
                    .chars()
                    .all(|c| matches!(c, 'u' | 'U' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D' | 'm' | 'M'))
            {
                lookahead.next();
                end = *lookahead;
            }

            *lookahead = end;
            mode.tag_syntax(&start, &end, SyntaxRole::Number);

            true
        })
    }

    /// Skips an identifier and returns its text.
    fn try_to_skip_identifier_text<'t>(
        &self,
        cursor: &mut Cursor<'t>,
        _mode: &mut ParseMode<'_>,
    ) -> Option<&'t str> {
        if !cursor.is_text() || cursor.char().is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }

        let text = cursor.text();
        cursor.next();

        Some(text)
    }

    /// Skips an identifier. Matches exactly what [`Grammar::try_to_skip_identifier_text`]
    /// matches.
    fn try_to_skip_identifier(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        self.try_to_skip_identifier_text(cursor, mode).is_some()
    }

    /// Skips a language-specific construct that the generic skip must treat as one unit, such
    /// as an attribute block. Languages without one keep this default.
    fn try_to_skip_atomic_block(
        &self,
        _cursor: &mut Cursor<'_>,
        _mode: &mut ParseMode<'_>,
    ) -> bool {
        false
    }

    /// Skips one logical unit of code: a comment, a string, an atomic block, a balanced bracket
    /// block, or otherwise a single token.
    fn generic_skip(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) {
        if cursor.at_end()
            || self.try_to_skip_comment(cursor, mode)
            || self.try_to_skip_string(cursor, mode)
            || self.try_to_skip_atomic_block(cursor, mode)
        {
            return;
        }

        let closer = match cursor.fundamental_type() {
            Some(FundamentalType::Symbol) => cursor
                .char()
                .and_then(|open| self.syntax().closing_bracket(open)),
            _ => None,
        };

        cursor.next();

        if let Some(closer) = closer {
            while cursor.is_in_bounds() && !cursor.is_symbol(closer) {
                self.generic_skip(cursor, mode);
            }

            cursor.next();
        }
    }

    /// Generic-skips until the current token is one of `stops` at this nesting level, or the end.
    fn generic_skip_until_any(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
        stops: &[char],
    ) {
        while cursor.is_in_bounds() && !stops.iter().any(|&stop| cursor.is_symbol(stop)) {
            self.generic_skip(cursor, mode);
        }
    }

    /// Generic-skips past the next `terminator` at this nesting level. Returns `false` if the
    /// end was reached first.
    fn generic_skip_until_after(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
        terminator: char,
    ) -> bool {
        self.generic_skip_until_any(cursor, mode, &[terminator]);

        cursor.next()
    }
}
