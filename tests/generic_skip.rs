mod common;

use paste::paste;
use pretty_assertions::assert_eq;

use doctopic::language::generic::{GenericLanguage, C_FAMILY_SYNTAX, PASCAL_SYNTAX};
use doctopic::language::system_verilog::SystemVerilog;
use doctopic::language::{Grammar, ParseMode};
use doctopic::tokenize::{SyntaxRole, Tokenizer};

use self::common::syntax_runs;

const C: GenericLanguage = GenericLanguage::new("C/C++", &C_FAMILY_SYNTAX);
const PASCAL: GenericLanguage = GenericLanguage::new("Pascal", &PASCAL_SYNTAX);

/// Returns the text one generic skip from the start of `text` passes over.
fn skipped(grammar: &impl Grammar, text: &str) -> String {
    let tokenizer = Tokenizer::new(text);
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    grammar.generic_skip(&mut cursor, &mut mode);

    tokenizer.first().text_between(&cursor).to_owned()
}

macro_rules! skip_tests {
    { $( $name:ident: $grammar:expr, $text:expr => $expected:expr ),+ $(,)? } => {
        $(
            paste! {
                #[test]
                fn [< test_skip_ $name >]() {
                    assert_eq!(skipped(&$grammar, $text), $expected, "{:?}", $text);
                }
            }
        )+
    };
}

skip_tests! {
    single_token: C, "abc def" => "abc",
    single_symbol: C, "+ 1" => "+",
    nested_brackets: C, "(a, (b)) c" => "(a, (b))",
    mixed_brackets: C, "[a{b(c)}] d" => "[a{b(c)}]",
    unclosed_bracket: C, "(a, (b) c" => "(a, (b) c",
    unclosed_inner_bracket: C, "[x, (y] z" => "[x, (y] z",
    string: C, "\"a)\" b" => "\"a)\"",
    escaped_quote: C, r#""a\"b" c"# => r#""a\"b""#,
    unterminated_string: C, "\"abc\ndef" => "\"abc",
    block_comment: C, "/* ) */ x" => "/* ) */",
    line_comment: C, "// )\nx" => "// )",
    comment_inside_brackets: C, "( // )\n ) z" => "( // )\n )",
    string_inside_brackets: C, "f(\")\") g" => "f",
    bracket_with_string: C, "(\")\") g" => "(\")\")",
    pascal_brace_comment: PASCAL, "{ ( } x" => "{ ( }",
    pascal_paren_comment: PASCAL, "(* ) *) x" => "(* ) *)",
    sv_attribute: SystemVerilog::new(), "(* keep *) wire" => "(* keep *)",
    empty: C, "" => "",
}

#[test]
fn test_skip_until_any_stops_at_top_level() {
    let tokenizer = Tokenizer::new("f(a, b), c");
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    C.generic_skip_until_any(&mut cursor, &mut mode, &[',', ')']);

    assert_eq!(tokenizer.first().text_between(&cursor), "f(a, b)");
    assert!(cursor.is_symbol(','));
}

#[test]
fn test_skip_until_after() {
    let tokenizer = Tokenizer::new("x { ; } ; y");
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    assert!(C.generic_skip_until_after(&mut cursor, &mut mode, ';'));
    assert_eq!(tokenizer.first().text_between(&cursor), "x { ; } ;");

    let tokenizer = Tokenizer::new("a b");
    let mut cursor = tokenizer.first();

    assert!(!C.generic_skip_until_after(&mut cursor, &mut mode, ';'));
    assert!(cursor.at_end());
}

#[test]
fn test_skip_tags_only_in_highlight_mode() {
    let text = "(a /* c */, \"s\")";

    let tokenizer = Tokenizer::new(text);
    C.generic_skip(&mut tokenizer.first(), &mut ParseMode::IterateOnly);
    assert!(syntax_runs(&tokenizer).is_empty());

    let tokenizer = Tokenizer::new(text);
    C.generic_skip(&mut tokenizer.first(), &mut ParseMode::SyntaxHighlight);
    assert_eq!(
        syntax_runs(&tokenizer),
        vec![
            (SyntaxRole::Comment, "/* c */".to_owned()),
            (SyntaxRole::String, "\"s\"".to_owned()),
        ]
    );
}

#[test]
fn test_whitespace_skip_includes_comments() {
    let tokenizer = Tokenizer::new("  // a\n  /* b */ x");
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    assert!(C.try_to_skip_whitespace(&mut cursor, &mut mode));
    assert_eq!(cursor.text(), "x");
    assert!(!C.try_to_skip_whitespace(&mut cursor, &mut mode));
}
