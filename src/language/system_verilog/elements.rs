use tracing::{debug, instrument};

use crate::language::system_verilog::SystemVerilog;
use crate::language::{attempt, Element, ElementKind, ElementSink, Grammar, ParseMode};
use crate::tokenize::{Cursor, Tokenizer};

const SCOPE_ENDS: &[&str] = &[
    "endmodule",
    "endinterface",
    "endprogram",
    "endpackage",
    "endclass",
];

type DeclarationRule = fn(&SystemVerilog, &mut Cursor<'_>, &mut ParseMode<'_>) -> bool;

const DECLARATION_RULES: &[DeclarationRule] = &[
    SystemVerilog::try_to_skip_module,
    SystemVerilog::try_to_skip_package,
    SystemVerilog::try_to_skip_class,
    SystemVerilog::try_to_skip_function,
    SystemVerilog::try_to_skip_typedef,
    SystemVerilog::try_to_skip_parameter_statement,
];

impl SystemVerilog {
    /// Skips the keyword that closes a scope, and its optional `: label`, popping the scope.
    fn try_to_skip_scope_end(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            if self
                .try_to_skip_any_keyword(lookahead, mode, SCOPE_ENDS)
                .is_none()
            {
                return false;
            }

            let mut label = *lookahead;
            self.skip_ws(&mut label, mode);

            if label.is_symbol(':') && !label.matches_text("::") {
                label.next();
                self.skip_ws(&mut label, mode);

                if self.try_to_skip_identifier(&mut label, mode) {
                    *lookahead = label;
                }
            }

            if let Some(sink) = mode.elements() {
                sink.pop_scope();
            }

            true
        })
    }

    /// Records the values of the enum starting at `enum_start` as embedded elements in the scope
    /// of the `typedef` that declares it.
    pub(super) fn record_enum_values(
        &self,
        enum_start: Cursor<'_>,
        sink: &mut ElementSink,
        typedef: &str,
    ) {
        let mut mode = ParseMode::IterateOnly;
        let mut cursor = enum_start;

        while cursor.is_in_bounds() && !cursor.is_symbol('{') {
            self.generic_skip(&mut cursor, &mut mode);
        }

        if !cursor.next() {
            return;
        }

        sink.push_scope(typedef);

        loop {
            self.skip_ws(&mut cursor, &mut mode);
            let start = cursor;

            if let Some(name) = self.try_to_skip_identifier_text(&mut cursor, &mut mode) {
                sink.add(ElementKind::EnumValue, name, &start, &cursor, false);

                if let Some(element) = sink.last_mut() {
                    element.embedded = true;
                }
            }

            self.generic_skip_until_any(&mut cursor, &mut mode, &[',', '}']);

            if !cursor.is_symbol(',') {
                break;
            }

            cursor.next();
        }

        sink.pop_scope();
    }

    /// Walks a whole source file recording its declarations. Modules, interfaces, programs,
    /// packages and classes open a scope that lasts until their `end` keyword.
    #[instrument(level = "debug", skip_all, fields(tokens = source.len()))]
    pub(super) fn discover(&self, source: &Tokenizer) -> Vec<Element> {
        let mut sink = ElementSink::new();
        let mut mode = ParseMode::CreateElements(&mut sink);
        let mut cursor = source.first();

        while cursor.is_in_bounds() {
            if self.try_to_skip_whitespace(&mut cursor, &mut mode)
                || self.try_to_skip_scope_end(&mut cursor, &mut mode)
            {
                continue;
            }

            let recorded = mode.elements().map_or(0, |sink| sink.elements().len());

            if DECLARATION_RULES
                .iter()
                .any(|rule| rule(self, &mut cursor, &mut mode))
            {
                if let Some(sink) = mode.elements() {
                    let scope = sink
                        .elements()
                        .get(recorded)
                        .filter(|element| element.kind.has_body_scope() && !element.external)
                        .map(|element| element.name.clone());

                    if let Some(scope) = scope {
                        sink.push_scope(scope);
                    }
                }

                continue;
            }

            self.generic_skip(&mut cursor, &mut mode);
        }

        debug!(elements = sink.elements().len(), "discovered elements");

        sink.into_elements()
    }
}
