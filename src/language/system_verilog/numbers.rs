use crate::language::system_verilog::SystemVerilog;
use crate::language::{attempt, Grammar, ParseMode};
use crate::tokenize::{Cursor, SyntaxRole};

const TIME_UNITS: &[&str] = &["s", "ms", "us", "ns", "ps", "fs", "step"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Base {
    fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_lowercase() {
            'b' => Self::Binary,
            'o' => Self::Octal,
            'd' => Self::Decimal,
            'h' => Self::Hex,
            _ => return None,
        })
    }

    fn is_digit(self, c: char) -> bool {
        match c {
            '_' | '?' | 'x' | 'X' | 'z' | 'Z' => true,
            _ => match self {
                Self::Binary => matches!(c, '0' | '1'),
                Self::Octal => matches!(c, '0'..='7'),
                Self::Decimal => c.is_ascii_digit(),
                Self::Hex => c.is_ascii_hexdigit(),
            },
        }
    }
}

/// Skips the digits of a based literal, which may span several adjacent tokens (`'h 12FF` lexes
/// as `12` and `FF`). `first` holds digits that were part of the base token. Returns `false` if
/// there were no digits at all.
fn skip_based_digits(cursor: &mut Cursor<'_>, base: Base, first: &str) -> bool {
    let mut has_digits = !first.is_empty();

    if !first.chars().all(|c| base.is_digit(c)) {
        return false;
    }

    if !has_digits {
        cursor.skip_whitespace();
    }

    loop {
        let digits = if cursor.is_symbol('?') {
            true
        } else {
            cursor.is_text() && cursor.text().chars().all(|c| base.is_digit(c))
        };

        if !digits {
            break;
        }

        has_digits = true;
        cursor.next();
    }

    has_digits
}

/// Skips `'[s]<base><digits>`. Moves `cursor` only on success.
fn try_to_skip_based_part(cursor: &mut Cursor<'_>) -> bool {
    let mut lookahead = *cursor;

    if !lookahead.is_symbol('\'') {
        return false;
    }

    lookahead.next();

    if !lookahead.is_text() {
        return false;
    }

    let text = lookahead.text();
    let unsigned = text
        .strip_prefix(|c| c == 's' || c == 'S')
        .filter(|rest| !rest.is_empty())
        .unwrap_or(text);

    let mut chars = unsigned.chars();

    let Some(base) = chars.next().and_then(Base::from_char) else {
        return false;
    };

    lookahead.next();

    if !skip_based_digits(&mut lookahead, base, chars.as_str()) {
        return false;
    }

    *cursor = lookahead;

    true
}

/// Skips a single-bit constant: `'0`, `'1`, `'x` or `'z`.
fn try_to_skip_unbased_unsized(cursor: &mut Cursor<'_>) -> bool {
    let mut lookahead = *cursor;

    if !lookahead.is_symbol('\'') {
        return false;
    }

    lookahead.next();

    if !matches!(lookahead.text(), "0" | "1" | "x" | "X" | "z" | "Z") {
        return false;
    }

    lookahead.next();
    *cursor = lookahead;

    true
}

impl SystemVerilog {
    /// A leading sign belongs to a number only where it can't be a binary operator, i.e. when
    /// the previous significant token can't end an operand.
    fn allows_sign(&self, cursor: &Cursor<'_>) -> bool {
        match cursor.previous_significant() {
            None => true,

            Some(previous) if previous.is_text() => self.is_keyword(previous.text()),

            Some(previous) => !(previous.is_symbol(')')
                || previous.is_symbol(']')
                || previous.is_symbol('}')
                || previous.is_symbol('\'')),
        }
    }

    /// Skips a numeric literal.
    ///
    /// The end of the literal only grows from its last confirmed point: a continuation (a
    /// fraction, an exponent, a based part or a time unit) is taken only once the tokens it
    /// requires are all present.
    pub(super) fn try_to_skip_sv_number(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            if lookahead.is_symbol('+') || lookahead.is_symbol('-') {
                if !self.allows_sign(lookahead) {
                    return false;
                }

                lookahead.next();
            }

            let end = if lookahead.char().is_some_and(|c| c.is_ascii_digit()) {
                lookahead.next();
                let mut end = *lookahead;

                // `4'b1001`, `8 'hFF`
                let mut based = *lookahead;
                based.skip_whitespace();

                if try_to_skip_based_part(&mut based) {
                    end = based;
                } else {
                    if lookahead.is_symbol('.') {
                        let mut fraction = *lookahead;
                        fraction.next();

                        if fraction.char().is_some_and(|c| c.is_ascii_digit()) {
                            fraction.next();
                            end = fraction;
                        }
                    }

                    *lookahead = end;

                    if lookahead.is_text() && matches!(lookahead.char(), Some('e' | 'E')) {
                        let mut exponent = *lookahead;
                        let marker = exponent.text();
                        exponent.next();

                        let digits = &marker[1..];

                        if !digits.is_empty()
                            && digits.chars().all(|c| c.is_ascii_digit() || c == '_')
                        {
                            end = exponent;
                        } else if digits.is_empty()
                            && (exponent.is_symbol('+') || exponent.is_symbol('-'))
                        {
                            exponent.next();

                            if exponent.char().is_some_and(|c| c.is_ascii_digit()) {
                                exponent.next();
                                end = exponent;
                            }
                        }
                    }

                    *lookahead = end;

                    if lookahead.is_text() && TIME_UNITS.contains(&lookahead.text()) {
                        lookahead.next();
                        end = *lookahead;
                    }
                }

                end
            } else if try_to_skip_based_part(lookahead) || try_to_skip_unbased_unsized(lookahead) {
                *lookahead
            } else {
                return false;
            };

            *lookahead = end;
            mode.tag_syntax(&start, &end, SyntaxRole::Number);

            true
        })
    }
}
