//! The fallback grammar: a language-agnostic reading of parameter lists and a display pass that
//! knows comments, strings, numbers and keywords.

use phf::phf_set;
use tracing::{debug, instrument};

use crate::language::{Grammar, Language, ParseMode, Syntax};
use crate::prototype::{ParameterStyle, ParsedPrototype};
use crate::tokenize::{Cursor, PrototypeRole, SyntaxRole, Tokenizer};

/// A language described entirely by its [`Syntax`] table.
#[derive(Debug)]
pub struct GenericLanguage {
    name: &'static str,
    syntax: &'static Syntax,
}

impl GenericLanguage {
    pub const fn new(name: &'static str, syntax: &'static Syntax) -> Self {
        Self { name, syntax }
    }
}

impl Grammar for GenericLanguage {
    fn syntax(&self) -> &Syntax {
        self.syntax
    }
}

impl Language for GenericLanguage {
    fn name(&self) -> &str {
        self.name
    }
}

/// Tags the parameters of a declaration, then its display roles.
#[instrument(level = "debug", skip_all, fields(text = tokenizer.text()))]
pub fn parse_prototype<G: Grammar + ?Sized>(grammar: &G, tokenizer: Tokenizer) -> ParsedPrototype {
    let style = tag_parameters(grammar, &tokenizer);
    syntax_highlight(grammar, &tokenizer);

    ParsedPrototype::new(tokenizer, style)
}

/// Tags the display roles of every token the grammar recognizes.
pub fn syntax_highlight<G: Grammar + ?Sized>(grammar: &G, tokenizer: &Tokenizer) {
    let mut mode = ParseMode::SyntaxHighlight;
    let mut cursor = tokenizer.first();

    while cursor.is_in_bounds() {
        highlight_step(grammar, &mut cursor, &mut mode);
    }
}

/// Advances past one highlightable construct, or a single token if there is none.
pub fn highlight_step<G: Grammar + ?Sized>(
    grammar: &G,
    cursor: &mut Cursor<'_>,
    mode: &mut ParseMode<'_>,
) {
    if grammar.try_to_skip_comment(cursor, mode)
        || grammar.try_to_skip_string(cursor, mode)
        || grammar.try_to_skip_number(cursor, mode)
    {
        return;
    }

    let start = *cursor;

    if start.is_text() && grammar.is_keyword(start.text()) {
        cursor.next();
        mode.tag_syntax(&start, cursor, SyntaxRole::Keyword);

        return;
    }

    if !grammar.try_to_skip_identifier(cursor, mode) {
        cursor.next();
    }
}

const TYPE_QUALIFIERS: &[&str] = &[
    "const", "volatile", "static", "register", "restrict", "extern", "mutable", "final",
    "readonly",
];

const PARAM_MODIFIERS: &[&str] = &[
    "in", "out", "ref", "inout", "params", "this", "var", "let", "val", "mut", "constref",
];

/// A significant piece of a parameter: a word, a symbol, a string or a bracket block.
#[derive(Debug, Clone, Copy)]
struct Unit<'t> {
    start: Cursor<'t>,
    end: Cursor<'t>,
}

impl<'t> Unit<'t> {
    fn is_single_token(&self) -> bool {
        self.end.index() == self.start.index() + 1
    }

    fn word(&self) -> Option<&'t str> {
        (self.is_single_token() && self.start.is_text()).then(|| self.start.text())
    }

    fn is_symbol(&self, c: char) -> bool {
        self.is_single_token() && self.start.is_symbol(c)
    }

    fn preceded_by(&self, c: char) -> bool {
        let mut before = self.start;

        before.previous() && before.is_symbol(c)
    }

    fn followed_by(&self, c: char) -> bool {
        self.end.is_symbol(c)
    }

    fn is_lone_colon(&self) -> bool {
        self.is_symbol(':')
            && !self.preceded_by(':')
            && !self.followed_by(':')
            && !self.followed_by('=')
    }

    fn is_assignment(&self) -> bool {
        self.is_symbol('=')
            && !self.followed_by('=')
            && !['<', '>', '!', '='].iter().any(|&c| self.preceded_by(c))
    }
}

fn units<'t, G: Grammar + ?Sized>(
    grammar: &G,
    start: Cursor<'t>,
    end: Cursor<'t>,
) -> Vec<Unit<'t>> {
    let mut mode = ParseMode::IterateOnly;
    let mut cursor = start;
    let mut units = Vec::new();

    loop {
        grammar.try_to_skip_whitespace(&mut cursor, &mut mode);

        if cursor >= end {
            break;
        }

        let unit_start = cursor;
        grammar.generic_skip(&mut cursor, &mut mode);

        if end < cursor {
            cursor = end;
        }

        units.push(Unit {
            start: unit_start,
            end: cursor,
        });
    }

    units
}

fn tag_units(mode: &ParseMode<'_>, units: &[Unit<'_>], role: PrototypeRole) {
    if let (Some(first), Some(last)) = (units.first(), units.last()) {
        mode.tag_prototype(&first.start, &last.end, role);
    }
}

/// Tags `= value` and returns the number of units before it.
fn tag_default_value(mode: &ParseMode<'_>, units: &[Unit<'_>]) -> usize {
    let Some(index) = units.iter().position(Unit::is_assignment) else {
        return units.len();
    };

    // `:=`
    let separator_start = match index.checked_sub(1) {
        Some(colon) if units[colon].is_symbol(':') && units[index].preceded_by(':') => colon,
        _ => index,
    };

    tag_units(
        mode,
        &units[separator_start..=index],
        PrototypeRole::DefaultValueSeparator,
    );
    tag_units(mode, &units[index + 1..], PrototypeRole::DefaultValue);

    separator_start
}

/// Tags leading modifier and qualifier words, always leaving at least one unit untagged.
fn tag_modifiers<G: Grammar + ?Sized>(
    grammar: &G,
    mode: &ParseMode<'_>,
    units: &[Unit<'_>],
) -> usize {
    let mut count = 0;

    while count + 1 < units.len() {
        let unit = &units[count];

        let role = if unit.word().is_none() {
            break;
        } else if TYPE_QUALIFIERS
            .iter()
            .any(|word| grammar.matches_word(&unit.start, word))
        {
            PrototypeRole::TypeQualifier
        } else if PARAM_MODIFIERS
            .iter()
            .any(|word| grammar.matches_word(&unit.start, word))
        {
            PrototypeRole::ParamModifier
        } else {
            break;
        };

        tag_units(mode, &units[count..=count], role);
        count += 1;
    }

    count
}

fn is_type_word<G: Grammar + ?Sized>(grammar: &G, word: &str) -> bool {
    grammar.is_keyword(word) || grammar.syntax().is_built_in_type(word)
}

/// Returns `true` if the parameter reads `[modifiers] name [?] : type`.
fn is_name_first<G: Grammar + ?Sized>(grammar: &G, units: &[Unit<'_>]) -> bool {
    let Some(colon) = units.iter().position(Unit::is_lone_colon) else {
        return false;
    };

    let modifiers = units[..colon]
        .iter()
        .take_while(|unit| {
            TYPE_QUALIFIERS
                .iter()
                .chain(PARAM_MODIFIERS)
                .any(|word| unit.word().is_some() && grammar.matches_word(&unit.start, word))
        })
        .count();

    let name = match &units[modifiers..colon] {
        [name] => name,
        [name, optional] if optional.is_symbol('?') => name,
        _ => return false,
    };

    name.word()
        .is_some_and(|word| !is_type_word(grammar, word))
}

fn tag_c_parameter<G: Grammar + ?Sized>(grammar: &G, mode: &ParseMode<'_>, units: &[Unit<'_>]) {
    let mut limit = tag_default_value(mode, units);

    if let Some(colon) = units[..limit].iter().position(Unit::is_lone_colon) {
        tag_units(
            mode,
            &units[colon..=colon],
            PrototypeRole::PropertyValueSeparator,
        );
        tag_units(mode, &units[colon + 1..limit], PrototypeRole::PropertyValue);
        limit = colon;
    }

    let modifiers = tag_modifiers(grammar, mode, &units[..limit]);
    let rest = &units[modifiers..limit];

    let mut name_end = rest.len();

    while name_end > 0 && rest[name_end - 1].start.is_symbol('[') {
        name_end -= 1;
    }

    let name = name_end
        .checked_sub(1)
        .filter(|&index| {
            rest[index]
                .word()
                .is_some_and(|word| !is_type_word(grammar, word))
        });

    let Some(name) = name else {
        tag_units(mode, rest, PrototypeRole::Type);

        return;
    };

    let mut prefix_start = name;

    while prefix_start > 0
        && ['*', '&', '^']
            .iter()
            .any(|&c| rest[prefix_start - 1].is_symbol(c))
    {
        prefix_start -= 1;
    }

    tag_units(mode, &rest[..prefix_start], PrototypeRole::Type);
    tag_units(
        mode,
        &rest[prefix_start..name],
        PrototypeRole::NamePrefixPartOfType,
    );
    tag_units(mode, &rest[name..=name], PrototypeRole::Name);
    tag_units(
        mode,
        &rest[name + 1..],
        PrototypeRole::NameSuffixPartOfType,
    );
}

fn tag_pascal_parameter<G: Grammar + ?Sized>(
    grammar: &G,
    mode: &ParseMode<'_>,
    units: &[Unit<'_>],
) {
    let limit = tag_default_value(mode, units);
    let colon = units[..limit].iter().position(Unit::is_lone_colon);
    let before = colon.unwrap_or(limit);

    let modifiers = tag_modifiers(grammar, mode, &units[..before]);
    tag_units(mode, &units[modifiers..before], PrototypeRole::Name);

    if let Some(colon) = colon {
        tag_units(
            mode,
            &units[colon..=colon],
            PrototypeRole::NameTypeSeparator,
        );
        tag_units(mode, &units[colon + 1..limit], PrototypeRole::Type);
    }
}

/// Finds the first top-level parameter list and tags its parameters. Returns the style the
/// parameters are written in.
pub fn tag_parameters<G: Grammar + ?Sized>(grammar: &G, tokenizer: &Tokenizer) -> ParameterStyle {
    let mut skip_mode = ParseMode::IterateOnly;
    let mode = ParseMode::ParsePrototype;
    let mut cursor = tokenizer.first();

    let closer = loop {
        if cursor.at_end() {
            return ParameterStyle::default();
        }

        if cursor.is_symbol('(') {
            break ')';
        }

        if cursor.is_symbol('[') {
            break ']';
        }

        grammar.generic_skip(&mut cursor, &mut skip_mode);
    };

    let open = cursor;
    cursor.next();
    mode.tag_prototype(&open, &cursor, PrototypeRole::StartOfParams);

    let mut parameters = Vec::new();

    loop {
        let start = cursor;
        grammar.generic_skip_until_any(&mut cursor, &mut skip_mode, &[',', ';', closer]);
        parameters.push(units(grammar, start, cursor));

        if cursor.at_end() {
            break;
        }

        let separator = cursor;
        cursor.next();

        if separator.is_symbol(closer) {
            mode.tag_prototype(&separator, &cursor, PrototypeRole::EndOfParams);

            break;
        }

        mode.tag_prototype(&separator, &cursor, PrototypeRole::ParamSeparator);
    }

    let style = if parameters
        .iter()
        .any(|parameter| is_name_first(grammar, parameter))
    {
        ParameterStyle::Pascal
    } else {
        ParameterStyle::C
    };

    debug!(parameters = parameters.len(), ?style, "tagging parameters");

    for parameter in parameters.iter().filter(|units| !units.is_empty()) {
        match style {
            ParameterStyle::C => tag_c_parameter(grammar, &mode, parameter),
            ParameterStyle::Pascal => tag_pascal_parameter(grammar, &mode, parameter),
        }
    }

    style
}

pub static C_FAMILY_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"', '\''],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &C_FAMILY_KEYWORDS,
    built_in_types: &C_FAMILY_TYPES,
    case_sensitive: true,
};

static C_FAMILY_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "auto", "bool", "break", "case", "catch", "char", "class", "const", "constexpr",
    "continue", "decltype", "default", "delete", "do", "double", "else", "enum", "explicit",
    "extern", "false", "final", "float", "for", "friend", "goto", "if", "inline", "int",
    "long", "mutable", "namespace", "new", "noexcept", "nullptr", "operator", "override",
    "private", "protected", "public", "register", "restrict", "return", "short", "signed",
    "sizeof", "static", "struct", "switch", "template", "this", "throw", "true", "try",
    "typedef", "typename", "union", "unsigned", "using", "virtual", "void", "volatile",
    "while",
};

static C_FAMILY_TYPES: phf::Set<&'static str> = phf_set! {
    "void", "bool", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
    "wchar_t", "char8_t", "char16_t", "char32_t", "size_t", "ptrdiff_t", "int8_t", "int16_t",
    "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t", "auto",
};

pub static C_SHARP_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"', '\''],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &C_SHARP_KEYWORDS,
    built_in_types: &C_SHARP_TYPES,
    case_sensitive: true,
};

static C_SHARP_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "abstract", "as", "async", "await", "base", "bool", "break", "byte", "case", "catch",
    "char", "checked", "class", "const", "continue", "decimal", "default", "delegate", "do",
    "double", "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed",
    "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal",
    "is", "lock", "long", "namespace", "new", "null", "object", "operator", "out", "override",
    "params", "private", "protected", "public", "readonly", "ref", "return", "sbyte",
    "sealed", "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this",
    "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
    "using", "var", "virtual", "void", "volatile", "while",
};

static C_SHARP_TYPES: phf::Set<&'static str> = phf_set! {
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long",
    "ulong", "short", "ushort", "object", "string", "void", "dynamic", "nint", "nuint",
};

pub static JAVA_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"', '\''],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &JAVA_KEYWORDS,
    built_in_types: &JAVA_TYPES,
    case_sensitive: true,
};

static JAVA_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "record", "return", "short", "static", "strictfp", "super", "switch",
    "synchronized", "this", "throw", "throws", "transient", "true", "try", "var", "void",
    "volatile", "while",
};

static JAVA_TYPES: phf::Set<&'static str> = phf_set! {
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
};

pub static JAVA_SCRIPT_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"', '\'', '`'],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &JAVA_SCRIPT_KEYWORDS,
    built_in_types: &JAVA_SCRIPT_TYPES,
    case_sensitive: true,
};

static JAVA_SCRIPT_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
    "continue", "debugger", "declare", "default", "delete", "do", "else", "enum", "export",
    "extends", "false", "finally", "for", "function", "get", "if", "implements", "import",
    "in", "instanceof", "interface", "let", "namespace", "new", "null", "private",
    "protected", "public", "readonly", "return", "set", "static", "super", "switch", "this",
    "throw", "true", "try", "type", "typeof", "undefined", "var", "void", "while", "with",
    "yield",
};

static JAVA_SCRIPT_TYPES: phf::Set<&'static str> = phf_set! {
    "any", "bigint", "boolean", "never", "null", "number", "object", "string", "symbol",
    "undefined", "unknown", "void",
};

pub static PYTHON_SYNTAX: Syntax = Syntax {
    line_comments: &["#"],
    block_comments: &[],
    quotes: &['"', '\''],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &PYTHON_KEYWORDS,
    built_in_types: &PYTHON_TYPES,
    case_sensitive: true,
};

static PYTHON_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
};

static PYTHON_TYPES: phf::Set<&'static str> = phf_set! {
    "bool", "bytes", "complex", "dict", "float", "int", "list", "object", "set", "str",
    "tuple",
};

pub static RUST_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    quotes: &['"'],
    escape: Some('\\'),
    brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
    keywords: &RUST_KEYWORDS,
    built_in_types: &RUST_TYPES,
    case_sensitive: true,
};

static RUST_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while",
};

static RUST_TYPES: phf::Set<&'static str> = phf_set! {
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64", "bool", "char", "str",
};

/// Pascal is case-insensitive, so its sets hold lowercase words.
pub static PASCAL_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("{", "}"), ("(*", "*)")],
    quotes: &['\''],
    escape: None,
    brackets: &[('(', ')'), ('[', ']')],
    keywords: &PASCAL_KEYWORDS,
    built_in_types: &PASCAL_TYPES,
    case_sensitive: false,
};

static PASCAL_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "and", "array", "begin", "case", "class", "const", "constref", "div", "do", "downto",
    "else", "end", "file", "for", "function", "goto", "if", "in", "inherited", "label", "mod",
    "nil", "not", "object", "of", "or", "out", "packed", "procedure", "program", "property",
    "record", "repeat", "set", "then", "to", "type", "until", "var", "while", "with",
};

static PASCAL_TYPES: phf::Set<&'static str> = phf_set! {
    "boolean", "byte", "cardinal", "char", "double", "extended", "int64", "integer",
    "longint", "longword", "pointer", "real", "shortint", "single", "smallint", "string",
    "word",
};
