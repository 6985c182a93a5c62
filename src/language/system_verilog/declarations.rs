use crate::language::system_verilog::{SystemVerilog, NET_TYPES};
use crate::language::{attempt, ElementKind, ElementSink, Grammar, ParseMode};
use crate::tokenize::{Cursor, PrototypeRole};

const MODULE_KEYWORDS: &[&str] = &["module", "macromodule", "interface", "program"];
const LIFETIMES: &[&str] = &["static", "automatic"];
const DIRECTIONS: &[&str] = &["input", "output", "inout", "ref"];
const PARAMETER_KEYWORDS: &[&str] = &["parameter", "localparam"];
const METHOD_QUALIFIERS: &[&str] = &["extern", "pure", "virtual", "static", "protected", "local"];
const FORWARD_TYPE_KEYWORDS: &[&str] = &["class", "interface", "struct", "union", "enum"];

type ItemRule = fn(&SystemVerilog, &mut Cursor<'_>, &mut ParseMode<'_>) -> bool;

impl SystemVerilog {
    fn record(
        &self,
        mode: &mut ParseMode<'_>,
        kind: ElementKind,
        name: &str,
        start: &Cursor<'_>,
        end: &Cursor<'_>,
    ) {
        if let Some(sink) = mode.elements() {
            sink.add(kind, name, start, end, true);
        }
    }

    fn skip_attributes(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) {
        while self.try_to_skip_attributes(cursor, mode) {
            self.skip_ws(cursor, mode);
        }
    }

    fn skip_lifetime(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) {
        if self.try_to_skip_any_keyword(cursor, mode, LIFETIMES).is_some() {
            self.skip_ws(cursor, mode);
        }
    }

    /// Skips a parenthesized list of `item`s. An item the rule doesn't recognize is
    /// generic-skipped up to the next `,` or `)`, so one odd parameter doesn't lose the list.
    fn try_to_skip_list(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
        item: ItemRule,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            let open = *lookahead;

            if !lookahead.is_symbol('(') {
                return false;
            }

            lookahead.next();
            mode.tag_prototype(&open, lookahead, PrototypeRole::StartOfParams);

            loop {
                self.skip_ws(lookahead, mode);

                if lookahead.at_end() {
                    return false;
                }

                if lookahead.is_symbol(')') {
                    let close = *lookahead;
                    lookahead.next();
                    mode.tag_prototype(&close, lookahead, PrototypeRole::EndOfParams);

                    return true;
                }

                if !item(self, lookahead, mode) {
                    self.generic_skip_until_any(lookahead, mode, &[',', ')']);
                }

                self.skip_ws(lookahead, mode);

                if lookahead.is_symbol(',') {
                    let separator = *lookahead;
                    lookahead.next();
                    mode.tag_prototype(&separator, lookahead, PrototypeRole::ParamSeparator);
                } else if !lookahead.is_symbol(')') {
                    self.generic_skip_until_any(lookahead, mode, &[',', ')']);
                }
            }
        })
    }

    /// Skips one port of a port list:
    /// `[attributes] [direction] [net type | var] [data type] name [dimensions] [= default]`.
    pub(super) fn try_to_skip_port(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_attributes(lookahead, mode);

            let direction = *lookahead;

            if self.try_to_skip_any_keyword(lookahead, mode, DIRECTIONS).is_some() {
                mode.tag_prototype(&direction, lookahead, PrototypeRole::ParamModifier);
                self.skip_ws(lookahead, mode);
            }

            let net = *lookahead;

            if self.try_to_skip_any_keyword(lookahead, mode, NET_TYPES).is_some()
                || self.try_to_skip_keyword(lookahead, mode, "var")
            {
                mode.tag_prototype(&net, lookahead, PrototypeRole::Type);
                self.skip_ws(lookahead, mode);
            }

            if !self.at_implied_type_name(lookahead) && !self.try_to_skip_data_type(lookahead, mode)
            {
                return false;
            }

            self.try_to_skip_declarator(lookahead, mode).is_some()
        })
    }

    /// Skips one parameter of a `#(...)` list: `[parameter | localparam] [type | data type]
    /// name [= default]`. The type may be implied.
    pub(super) fn try_to_skip_parameter_declaration(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_attributes(lookahead, mode);

            let keyword = *lookahead;

            if self
                .try_to_skip_any_keyword(lookahead, mode, PARAMETER_KEYWORDS)
                .is_some()
            {
                mode.tag_prototype(&keyword, lookahead, PrototypeRole::ParamModifier);
                self.skip_ws(lookahead, mode);
            }

            let ty = *lookahead;

            if self.try_to_skip_keyword(lookahead, mode, "type") {
                mode.tag_prototype(&ty, lookahead, PrototypeRole::Type);
                self.skip_ws(lookahead, mode);
            } else if !self.at_implied_type_name(lookahead)
                && !self.try_to_skip_data_type(lookahead, mode)
            {
                return false;
            }

            self.try_to_skip_declarator(lookahead, mode).is_some()
        })
    }

    /// Skips `#` and the parameter port list after it.
    fn try_to_skip_parameter_port_list(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            if !lookahead.is_symbol('#') {
                return false;
            }

            lookahead.next();
            self.skip_ws(lookahead, mode);

            self.try_to_skip_list(lookahead, mode, Self::try_to_skip_parameter_declaration)
        })
    }

    /// Skips `import pkg::*, other::name;`.
    fn try_to_skip_import(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.try_to_skip_keyword(lookahead, mode, "import")
                && self.generic_skip_until_after(lookahead, mode, ';')
        })
    }

    /// Skips a module, interface or program header:
    /// `[attributes] [extern] module [lifetime] name [imports] [#(parameters)] [(ports)] ;`.
    ///
    /// A header cut short by the end of the text still matches as long as its lists are closed.
    pub(super) fn try_to_skip_module(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;
            self.skip_attributes(lookahead, mode);

            let external = self.try_to_skip_keyword(lookahead, mode, "extern");

            if external {
                self.skip_ws(lookahead, mode);
            }

            let Some(keyword) = self.try_to_skip_any_keyword(lookahead, mode, MODULE_KEYWORDS)
            else {
                return false;
            };

            self.skip_ws(lookahead, mode);
            self.skip_lifetime(lookahead, mode);

            let Some(name) = self.try_to_skip_identifier_text(lookahead, mode) else {
                return false;
            };

            self.skip_ws(lookahead, mode);

            while self.try_to_skip_import(lookahead, mode) {
                self.skip_ws(lookahead, mode);
            }

            if lookahead.is_symbol('#') {
                if !self.try_to_skip_parameter_port_list(lookahead, mode) {
                    return false;
                }

                self.skip_ws(lookahead, mode);
            }

            if lookahead.is_symbol('(') {
                if !self.try_to_skip_list(lookahead, mode, Self::try_to_skip_port) {
                    return false;
                }

                self.skip_ws(lookahead, mode);
            }

            // anything else after the name is a declaration using the keyword, such as a
            // `virtual interface bus_if vif;` handle
            if !lookahead.at_end() && !lookahead.is_symbol(';') {
                return false;
            }

            lookahead.next();

            let kind = match keyword {
                "interface" => ElementKind::Interface,
                "program" => ElementKind::Program,
                _ => ElementKind::Module,
            };

            self.record(mode, kind, name, &start, lookahead);

            if external {
                if let Some(element) = mode.elements().and_then(ElementSink::last_mut) {
                    element.external = true;
                }
            }

            true
        })
    }

    /// Skips `package [lifetime] name;`.
    pub(super) fn try_to_skip_package(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;

            if !self.try_to_skip_keyword(lookahead, mode, "package") {
                return false;
            }

            self.skip_ws(lookahead, mode);
            self.skip_lifetime(lookahead, mode);

            let Some(name) = self.try_to_skip_identifier_text(lookahead, mode) else {
                return false;
            };

            self.generic_skip_until_after(lookahead, mode, ';');
            self.record(mode, ElementKind::Package, name, &start, lookahead);

            true
        })
    }

    /// Skips a class header:
    /// `[virtual | interface] class [lifetime] name [#(parameters)] [extends ...] ;`.
    pub(super) fn try_to_skip_class(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;
            self.skip_attributes(lookahead, mode);

            if self
                .try_to_skip_any_keyword(lookahead, mode, &["virtual", "interface"])
                .is_some()
            {
                self.skip_ws(lookahead, mode);
            }

            if !self.try_to_skip_keyword(lookahead, mode, "class") {
                return false;
            }

            self.skip_ws(lookahead, mode);
            self.skip_lifetime(lookahead, mode);

            let Some(name) = self.try_to_skip_identifier_text(lookahead, mode) else {
                return false;
            };

            self.skip_ws(lookahead, mode);

            if lookahead.is_symbol('#') && !self.try_to_skip_parameter_port_list(lookahead, mode) {
                return false;
            }

            self.generic_skip_until_after(lookahead, mode, ';');
            self.record(mode, ElementKind::Class, name, &start, lookahead);

            true
        })
    }

    /// Returns `true` if a function's return type was left implied, i.e. the cursor is already at
    /// the function's name.
    fn at_function_name(&self, cursor: &Cursor<'_>) -> bool {
        let mut scan = ParseMode::IterateOnly;
        let mut lookahead = *cursor;

        if !self.try_to_skip_function_name(&mut lookahead, &mut scan) {
            return false;
        }

        self.skip_ws(&mut lookahead, &mut scan);

        lookahead.at_end() || lookahead.is_symbol('(') || lookahead.is_symbol(';')
    }

    /// Skips `name`, `new` or a scoped name such as `cls::name`.
    fn try_to_skip_function_name(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| loop {
            if lookahead.matches_token("new") {
                lookahead.next();
            } else if !self.try_to_skip_identifier(lookahead, mode) {
                return false;
            }

            if !lookahead.try_skip_text("::") {
                return true;
            }
        })
    }

    /// Skips a function or task header:
    /// `[qualifiers] function [lifetime] [return type] name [(ports)] ;`.
    pub(super) fn try_to_skip_function(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;
            self.skip_attributes(lookahead, mode);

            while self
                .try_to_skip_any_keyword(lookahead, mode, METHOD_QUALIFIERS)
                .is_some()
            {
                self.skip_ws(lookahead, mode);
            }

            let Some(keyword) = self.try_to_skip_any_keyword(lookahead, mode, &["function", "task"])
            else {
                return false;
            };

            self.skip_ws(lookahead, mode);
            self.skip_lifetime(lookahead, mode);

            if keyword == "function"
                && !self.at_function_name(lookahead)
                && !self.try_to_skip_data_type(lookahead, mode)
            {
                return false;
            }

            let name_start = *lookahead;

            if !self.try_to_skip_function_name(lookahead, mode) {
                return false;
            }

            let name = name_start.text_between(lookahead);
            self.skip_ws(lookahead, mode);

            if lookahead.is_symbol('(') {
                if !self.try_to_skip_list(lookahead, mode, Self::try_to_skip_port) {
                    return false;
                }

                self.skip_ws(lookahead, mode);
            }

            self.generic_skip_until_after(lookahead, mode, ';');

            let kind = match keyword {
                "task" => ElementKind::Task,
                _ => ElementKind::Function,
            };

            // `function void cls::name();` defines a method out of its class
            let (class_scope, name) = match name.rsplit_once("::") {
                Some((class_scope, name)) => (Some(class_scope), name),
                None => (None, name),
            };

            self.record(mode, kind, name, &start, lookahead);

            if let Some(class_scope) = class_scope {
                if let Some(element) = mode.elements().and_then(ElementSink::last_mut) {
                    element
                        .scope
                        .extend(class_scope.split("::").map(str::to_owned));
                }
            }

            true
        })
    }

    /// Skips `typedef class name;` and the like, returning the name.
    fn try_to_skip_forward_typedef<'t>(
        &self,
        cursor: &mut Cursor<'t>,
        mode: &mut ParseMode<'_>,
    ) -> Option<&'t str> {
        let mut name = None;

        let matched = attempt(cursor, mode, |lookahead, mode| {
            if self
                .try_to_skip_any_keyword(lookahead, mode, FORWARD_TYPE_KEYWORDS)
                .is_none()
            {
                return false;
            }

            self.skip_ws(lookahead, mode);

            // `typedef interface class name;`
            if self.try_to_skip_keyword(lookahead, mode, "class") {
                self.skip_ws(lookahead, mode);
            }

            name = self.try_to_skip_identifier_text(lookahead, mode);
            self.skip_ws(lookahead, mode);

            name.is_some() && lookahead.is_symbol(';')
        });

        if matched {
            name
        } else {
            None
        }
    }

    /// Skips `typedef <data type> name [dimensions];`. The values of an enum typedef are
    /// recorded as embedded elements scoped under it.
    pub(super) fn try_to_skip_typedef(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;

            if !self.try_to_skip_keyword(lookahead, mode, "typedef") {
                return false;
            }

            self.skip_ws(lookahead, mode);
            let enum_start = self.matches_word(lookahead, "enum").then_some(*lookahead);

            let name = match self.try_to_skip_forward_typedef(lookahead, mode) {
                Some(name) => name,

                None => {
                    if !self.try_to_skip_data_type(lookahead, mode) {
                        return false;
                    }

                    let Some(name) = self.try_to_skip_identifier_text(lookahead, mode) else {
                        return false;
                    };

                    name
                }
            };

            self.generic_skip_until_after(lookahead, mode, ';');
            self.record(mode, ElementKind::Type, name, &start, lookahead);

            if let (Some(enum_start), Some(sink)) = (enum_start, mode.elements()) {
                self.record_enum_values(enum_start, sink, name);
            }

            true
        })
    }

    /// Skips `parameter [type] name = value, ...;` or its `localparam` form, recording each
    /// name.
    pub(super) fn try_to_skip_parameter_statement(
        &self,
        cursor: &mut Cursor<'_>,
        mode: &mut ParseMode<'_>,
    ) -> bool {
        attempt(cursor, mode, |lookahead, mode| {
            self.skip_ws(lookahead, mode);
            let start = *lookahead;

            if self
                .try_to_skip_any_keyword(lookahead, mode, PARAMETER_KEYWORDS)
                .is_none()
            {
                return false;
            }

            mode.tag_prototype(&start, lookahead, PrototypeRole::ParamModifier);
            self.skip_ws(lookahead, mode);

            if self.try_to_skip_keyword(lookahead, mode, "type") {
                self.skip_ws(lookahead, mode);
            } else if !self.at_implied_type_name(lookahead)
                && !self.try_to_skip_data_type(lookahead, mode)
            {
                return false;
            }

            let mut names = Vec::new();

            loop {
                let Some(name) = self.try_to_skip_declarator(lookahead, mode) else {
                    return false;
                };

                names.push(name);
                self.skip_ws(lookahead, mode);

                if !lookahead.is_symbol(',') {
                    break;
                }

                lookahead.next();
                self.skip_ws(lookahead, mode);
            }

            self.generic_skip_until_after(lookahead, mode, ';');

            for name in names {
                self.record(mode, ElementKind::Parameter, name, &start, lookahead);
            }

            true
        })
    }
}
