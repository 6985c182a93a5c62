use crate::language::system_verilog::{SystemVerilog, INTEGER_VECTOR_TYPES, SIMPLE_TYPES};
use crate::language::{attempt, Grammar, ParseMode};
use crate::tokenize::{Cursor, PrototypeRole};

const AGGREGATE_KEYWORDS: &[&str] = &["struct", "union", "enum"];
const AGGREGATE_MODIFIERS: &[&str] = &["packed", "tagged", "soft", "signed", "unsigned"];
const SIGNING: &[&str] = &["signed", "unsigned"];

impl SystemVerilog {
    /// Returns `true` if the cursor is at a name whose type was left implied: an identifier
    /// (with optional unpacked dimensions) followed by `=`, `,`, `)` or the end of the text.
    ///
    /// Only looks ahead; nothing is consumed or tagged.
    pub(super) fn at_implied_type_name(&self, cursor: &Cursor<'_>) -> bool {
        let mut scan = ParseMode::IterateOnly;
        let mut lookahead = *cursor;

        if !self.try_to_skip_identifier(&mut lookahead, &mut scan) {
            return false;
        }

        self.skip_ws(&mut lookahead, &mut scan);

        while lookahead.is_symbol('[') {
            self.generic_skip(&mut lookahead, &mut scan);
            self.skip_ws(&mut lookahead, &mut scan);
        }

        lookahead.at_end()
            || lookahead.is_symbol('=')
            || lookahead.is_symbol(',')
            || lookahead.is_symbol(')')
            || lookahead.is_symbol(';')
    }

    /// Skips `signed` or `unsigned`, tagging it as a type modifier.
    pub(super) fn try_to_skip_signing(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        let start = *cursor;

        if self.try_to_skip_any_keyword(cursor, mode, SIGNING).is_none() {
            return false;
        }

        mode.tag_prototype(&start, cursor, PrototypeRole::TypeModifier);

        true
    }

    /// Skips a packed dimension such as `[7:0]`, tagging its brackets and contents as type
    /// modifiers.
    pub(super) fn try_to_skip_packed_dimension(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let open = *lookahead;

            if !lookahead.is_symbol('[') {
                return false;
            }

            lookahead.next();
            let contents = *lookahead;
            self.generic_skip_until_any(lookahead, mode, &[']']);
            let close = *lookahead;

            if !lookahead.next() {
                return false;
            }

            mode.tag_prototype(&open, &contents, PrototypeRole::OpeningTypeModifier);
            mode.tag_prototype(&contents, &close, PrototypeRole::TypeModifier);
            mode.tag_prototype(&close, lookahead, PrototypeRole::ClosingTypeModifier);

            true
        })
    }

    /// Skips any number of packed dimensions and the whitespace after them.
    fn skip_packed_dimensions(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) {
        while self.try_to_skip_packed_dimension(cursor, mode) {
            self.skip_ws(cursor, mode);
        }
    }

    /// Skips a `struct`, `union` or `enum` type with its brace body, any packed dimensions after
    /// it, and trailing whitespace.
    pub(super) fn try_to_skip_aggregate_type(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            let Some(keyword) = self.try_to_skip_any_keyword(lookahead, mode, AGGREGATE_KEYWORDS)
            else {
                return false;
            };

            mode.tag_prototype(&start, lookahead, PrototypeRole::Type);
            self.skip_ws(lookahead, mode);

            loop {
                let modifier = *lookahead;

                if self
                    .try_to_skip_any_keyword(lookahead, mode, AGGREGATE_MODIFIERS)
                    .is_none()
                {
                    break;
                }

                mode.tag_prototype(&modifier, lookahead, PrototypeRole::TypeModifier);
                self.skip_ws(lookahead, mode);
            }

            // the base type of an enum, as in `enum logic [1:0] { ... }`
            if keyword == "enum" && !lookahead.is_symbol('{') {
                if !self.try_to_skip_data_type(lookahead, mode) {
                    return false;
                }

                self.skip_ws(lookahead, mode);
            }

            let body = *lookahead;

            if !lookahead.is_symbol('{') {
                return false;
            }

            self.generic_skip(lookahead, mode);

            let mut last = *lookahead;

            if !(last.previous() && last.is_symbol('}') && last > body) {
                return false;
            }

            mode.tag_prototype(&body, lookahead, PrototypeRole::Type);
            self.skip_ws(lookahead, mode);
            self.skip_packed_dimensions(lookahead, mode);

            true
        })
    }

    /// Skips a type name: `name`, `pkg::name`, `interface.modport`, each optionally followed by
    /// a `#(...)` parameter value list. Also skips the whitespace after it.
    fn try_to_skip_type_name(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            if !self.try_to_skip_identifier(lookahead, mode) {
                return false;
            }

            while lookahead.try_skip_text("::") {
                if !self.try_to_skip_identifier(lookahead, mode) {
                    return false;
                }
            }

            if lookahead.is_symbol('.') {
                lookahead.next();

                if !self.try_to_skip_identifier(lookahead, mode) {
                    return false;
                }
            }

            mode.tag_prototype(&start, lookahead, PrototypeRole::Type);
            self.skip_ws(lookahead, mode);

            if lookahead.is_symbol('#') {
                let parameters = *lookahead;
                lookahead.next();
                self.skip_ws(lookahead, mode);

                if !lookahead.is_symbol('(') {
                    return false;
                }

                self.generic_skip(lookahead, mode);
                mode.tag_prototype(&parameters, lookahead, PrototypeRole::Type);
                self.skip_ws(lookahead, mode);
            }

            true
        })
    }

    /// Skips a data type: a built-in type with its signing and packed dimensions, an aggregate
    /// type, a named type, or an implicit type made only of signing and dimensions.
    ///
    /// Leaves the cursor after any whitespace that follows the type.
    pub(super) fn try_to_skip_data_type(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            if self
                .try_to_skip_any_keyword(lookahead, mode, INTEGER_VECTOR_TYPES)
                .or_else(|| self.try_to_skip_any_keyword(lookahead, mode, SIMPLE_TYPES))
                .is_some()
            {
                mode.tag_prototype(&start, lookahead, PrototypeRole::Type);
                self.skip_ws(lookahead, mode);
            } else if self.try_to_skip_aggregate_type(lookahead, mode) {
                return true;
            } else if !lookahead.is_symbol('[')
                && !self.matches_any_word(lookahead, SIGNING)
                && !self.try_to_skip_type_name(lookahead, mode)
            {
                return false;
            }

            if self.try_to_skip_signing(lookahead, mode) {
                self.skip_ws(lookahead, mode);
            }

            self.skip_packed_dimensions(lookahead, mode);

            true
        })
    }

    pub(super) fn matches_any_word(&self, cursor: &Cursor<'_>, words: &[&str]) -> bool {
        words.iter().any(|word| self.matches_word(cursor, word))
    }

    /// Skips the part of a declaration after its type: the name, unpacked dimensions and an
    /// optional `= default`, which runs up to the next `,` or `)` at this nesting level.
    ///
    /// Returns the name.
    pub(super) fn try_to_skip_declarator<'t>(
        &self,
        cursor: &mut Cursor<'t>,
        mode: &mut ParseMode<'_>,
    ) -> Option<&'t str> {
        let mut name = None;

        let matched = attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;
            let Some(text) = self.try_to_skip_identifier_text(lookahead, mode) else {
                return false;
            };

            mode.tag_prototype(&start, lookahead, PrototypeRole::Name);
            name = Some(text);
            self.skip_ws(lookahead, mode);

            while lookahead.is_symbol('[') {
                let dimension = *lookahead;
                self.generic_skip(lookahead, mode);
                mode.tag_prototype(&dimension, lookahead, PrototypeRole::NameSuffixPartOfType);
                self.skip_ws(lookahead, mode);
            }

            if lookahead.is_symbol('=') {
                let separator = *lookahead;
                lookahead.next();
                mode.tag_prototype(&separator, lookahead, PrototypeRole::DefaultValueSeparator);
                self.skip_ws(lookahead, mode);

                let value = *lookahead;
                self.generic_skip_until_any(lookahead, mode, &[',', ')', ';']);
                let (value, value_end) = value.trimmed(lookahead);

                if value == value_end {
                    return false;
                }

                mode.tag_prototype(&value, &value_end, PrototypeRole::DefaultValue);
            }

            true
        });

        if matched {
            name
        } else {
            None
        }
    }
}
