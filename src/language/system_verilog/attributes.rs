use crate::language::system_verilog::SystemVerilog;
use crate::language::{attempt, Grammar, ParseMode};
use crate::tokenize::{Cursor, PrototypeRole, SyntaxRole};

impl SystemVerilog {
    /// Skips an attribute block, `(* name [= value], ... *)`.
    ///
    /// `(*)` is not an attribute block, and neither is `(*` followed by anything that reaches a
    /// `)` before the closing `*)`. The block is tagged as metadata for display and as a
    /// parameter modifier for prototypes.
    pub(super) fn try_to_skip_attributes(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let start = *lookahead;

            if !lookahead.try_skip_text("(*") {
                return false;
            }

            let open_end = *lookahead;

            loop {
                self.skip_ws(lookahead, mode);

                if !self.try_to_skip_identifier(lookahead, mode) {
                    return false;
                }

                self.skip_ws(lookahead, mode);

                if lookahead.is_symbol('=') {
                    lookahead.next();

                    while lookahead.is_in_bounds()
                        && !lookahead.is_symbol(',')
                        && !lookahead.matches_text("*)")
                    {
                        if lookahead.is_symbol(')') {
                            return false;
                        }

                        self.generic_skip(lookahead, mode);
                    }
                }

                if lookahead.is_symbol(',') {
                    lookahead.next();

                    continue;
                }

                let close = *lookahead;

                if !lookahead.try_skip_text("*)") {
                    return false;
                }

                mode.tag_prototype(&start, &open_end, PrototypeRole::OpeningParamModifier);
                mode.tag_prototype(&open_end, &close, PrototypeRole::ParamModifier);
                mode.tag_prototype(&close, lookahead, PrototypeRole::ClosingParamModifier);
                mode.tag_syntax(&start, lookahead, SyntaxRole::Metadata);

                return true;
            }
        })
    }
}
