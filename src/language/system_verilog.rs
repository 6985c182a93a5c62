//! SystemVerilog: the grammar of its declarations, literals and attribute blocks.

mod attributes;
mod declarations;
mod elements;
mod numbers;
mod types;

use phf::phf_set;
use tracing::{debug, instrument};

use crate::language::{generic, Grammar, Language, ParseMode, Syntax};
use crate::prototype::{ParameterStyle, ParsedPrototype};
use crate::tokenize::{Cursor, Tokenizer};
use crate::topic::Topic;

pub static SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"'],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &KEYWORDS,
    built_in_types: &BUILT_IN_TYPES,
    case_sensitive: true,
};

static KEYWORDS: phf::Set<&'static str> = phf_set! {
    "accept_on", "alias", "always", "always_comb", "always_ff", "always_latch", "and",
    "assert", "assign", "assume", "automatic", "before", "begin", "bind", "bins", "binsof",
    "bit", "break", "buf", "bufif0", "bufif1", "byte", "case", "casex", "casez", "cell",
    "chandle", "checker", "class", "clocking", "cmos", "config", "const", "constraint",
    "context", "continue", "cover", "covergroup", "coverpoint", "cross", "deassign",
    "default", "defparam", "design", "disable", "dist", "do", "edge", "else", "end",
    "endcase", "endchecker", "endclass", "endclocking", "endconfig", "endfunction",
    "endgenerate", "endgroup", "endinterface", "endmodule", "endpackage", "endprimitive",
    "endprogram", "endproperty", "endspecify", "endsequence", "endtable", "endtask", "enum",
    "event", "eventually", "expect", "export", "extends", "extern", "final", "first_match",
    "for", "force", "foreach", "forever", "fork", "forkjoin", "function", "generate",
    "genvar", "global", "highz0", "highz1", "if", "iff", "ifnone", "ignore_bins",
    "illegal_bins", "implements", "implies", "import", "incdir", "include", "initial",
    "inout", "input", "inside", "instance", "int", "integer", "interconnect", "interface",
    "intersect", "join", "join_any", "join_none", "large", "let", "liblist", "library",
    "local", "localparam", "logic", "longint", "macromodule", "matches", "medium", "modport",
    "module", "nand", "negedge", "nettype", "new", "nexttime", "nmos", "nor",
    "noshowcancelled", "not", "notif0", "notif1", "null", "or", "output", "package",
    "packed", "parameter", "pmos", "posedge", "primitive", "priority", "program", "property",
    "protected", "pull0", "pull1", "pulldown", "pullup", "pulsestyle_ondetect",
    "pulsestyle_onevent", "pure", "rand", "randc", "randcase", "randsequence", "rcmos",
    "real", "realtime", "ref", "reg", "reject_on", "release", "repeat", "restrict", "return",
    "rnmos", "rpmos", "rtran", "rtranif0", "rtranif1", "s_always", "s_eventually",
    "s_nexttime", "s_until", "s_until_with", "scalared", "sequence", "shortint", "shortreal",
    "showcancelled", "signed", "small", "soft", "solve", "specify", "specparam", "static",
    "string", "strong", "strong0", "strong1", "struct", "super", "supply0", "supply1",
    "sync_accept_on", "sync_reject_on", "table", "tagged", "task", "this", "throughout",
    "time", "timeprecision", "timeunit", "tran", "tranif0", "tranif1", "tri", "tri0", "tri1",
    "triand", "trior", "trireg", "type", "typedef", "union", "unique", "unique0", "unsigned",
    "until", "until_with", "untyped", "use", "uwire", "var", "vectored", "virtual", "void",
    "wait", "wait_order", "wand", "weak", "weak0", "weak1", "while", "wildcard", "wire",
    "with", "within", "wor", "xnor", "xor",
};

static BUILT_IN_TYPES: phf::Set<&'static str> = phf_set! {
    "bit", "logic", "reg", "byte", "shortint", "int", "longint", "integer", "time",
    "shortreal", "real", "realtime", "string", "chandle", "event", "void", "supply0",
    "supply1", "tri", "triand", "trior", "trireg", "tri0", "tri1", "uwire", "wire", "wand",
    "wor",
};

pub(crate) const INTEGER_VECTOR_TYPES: &[&str] = &["bit", "logic", "reg"];

pub(crate) const SIMPLE_TYPES: &[&str] = &[
    "byte", "shortint", "int", "longint", "integer", "time", "shortreal", "real", "realtime",
    "string", "chandle", "event", "void",
];

pub(crate) const NET_TYPES: &[&str] = &[
    "supply0", "supply1", "tri", "triand", "trior", "trireg", "tri0", "tri1", "uwire", "wire",
    "wand", "wor", "interconnect",
];

#[derive(Debug, Default)]
pub struct SystemVerilog;

impl SystemVerilog {
    pub fn new() -> Self {
        Self
    }

    /// Skips whitespace and comments; used between the parts of a declaration.
    fn skip_ws(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) {
        self.try_to_skip_whitespace(cursor, mode);
    }

    /// Tries each declaration rule the comment type suggests, most likely first.
    fn tag_declaration(&self, tokenizer: &Tokenizer, comment_type: Option<&str>) -> bool {
        type Rule = fn(&SystemVerilog, &mut Cursor<'_>, &mut ParseMode<'_>) -> bool;

        const MODULE: Rule = SystemVerilog::try_to_skip_module;
        const PACKAGE: Rule = SystemVerilog::try_to_skip_package;
        const CLASS: Rule = SystemVerilog::try_to_skip_class;
        const FUNCTION: Rule = SystemVerilog::try_to_skip_function;
        const TYPEDEF: Rule = SystemVerilog::try_to_skip_typedef;
        const PARAMETER: Rule = SystemVerilog::try_to_skip_parameter_statement;

        let rules: &[Rule] = match comment_type.map(str::to_ascii_lowercase).as_deref() {
            Some("module" | "interface" | "program") => &[MODULE],
            Some("package") => &[PACKAGE],
            Some("class") => &[CLASS],
            Some("function" | "task") => &[FUNCTION],
            Some("type") => &[TYPEDEF],
            Some("parameter" | "constant") => &[PARAMETER],
            _ => &[MODULE, CLASS, FUNCTION, TYPEDEF, PARAMETER, PACKAGE],
        };

        let mut mode = ParseMode::ParsePrototype;

        rules.iter().any(|rule| {
            let mut cursor = tokenizer.first();

            rule(self, &mut cursor, &mut mode)
        })
    }
}

impl Grammar for SystemVerilog {
    fn syntax(&self) -> &Syntax {
        &SYNTAX
    }

    /// Skips a simple identifier, which may contain `$` after its first character, or an
    /// escaped identifier: a `\` followed by everything up to the next whitespace. Reserved
    /// words are not identifiers.
    fn try_to_skip_identifier_text<'t>(
        &self,
        cursor: &mut Cursor<'t>,
        _mode: &mut ParseMode<'_>,
    ) -> Option<&'t str> {
        let start = *cursor;
        let mut lookahead = *cursor;

        if lookahead.is_symbol('\\') {
            lookahead.next();

            while lookahead.is_in_bounds() && !lookahead.is_whitespace() {
                lookahead.next();
            }

            if lookahead.index() <= start.index() + 1 {
                return None;
            }
        } else {
            if !lookahead.is_text() || lookahead.char().is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }

            lookahead.next();

            // a text token can only directly follow another one after a `$`, as in `a$1b`
            while lookahead.is_symbol('$') || lookahead.is_text() {
                lookahead.next();
            }

            if self.is_keyword(start.text_between(&lookahead)) {
                return None;
            }
        }

        *cursor = lookahead;

        Some(start.text_between(cursor))
    }

    fn try_to_skip_number(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        self.try_to_skip_sv_number(cursor, mode)
    }

    fn try_to_skip_atomic_block(&self, cursor: &mut Cursor<'_>, mode: &mut ParseMode<'_>) -> bool {
        self.try_to_skip_attributes(cursor, mode)
    }
}

impl Language for SystemVerilog {
    fn name(&self) -> &str {
        "SystemVerilog"
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(text = tokenizer.text(), comment_type = ?comment_type)
    )]
    fn parse_tokenized_prototype(
        &self,
        tokenizer: Tokenizer,
        comment_type: Option<&str>,
    ) -> ParsedPrototype {
        if !self.tag_declaration(&tokenizer, comment_type) {
            debug!("no declaration rule matched, falling back to the generic parameter reader");
            generic::tag_parameters(self, &tokenizer);
        }

        self.syntax_highlight(&tokenizer);

        ParsedPrototype::new(tokenizer, ParameterStyle::C)
    }

    fn discover_elements(&self, source: &Tokenizer) -> Vec<Topic> {
        self.discover(source)
            .into_iter()
            .map(|element| Topic::from_element(element, self, source.tab_width()))
            .collect()
    }

    fn syntax_highlight(&self, source: &Tokenizer) {
        let mut mode = ParseMode::SyntaxHighlight;
        let mut cursor = source.first();

        while cursor.is_in_bounds() {
            if !self.try_to_skip_attributes(&mut cursor, &mut mode) {
                generic::highlight_step(self, &mut cursor, &mut mode);
            }
        }
    }
}
