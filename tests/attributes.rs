mod common;

use pretty_assertions::assert_eq;

use doctopic::language::system_verilog::SystemVerilog;
use doctopic::language::{Grammar, Language, ParseMode};
use doctopic::tokenize::{PrototypeRole, SyntaxRole, Tokenizer};

use self::common::{prototype_runs, run, syntax_runs};

fn skip_attributes(text: &str) -> Option<String> {
    let tokenizer = Tokenizer::new(text);
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    SystemVerilog::new()
        .try_to_skip_atomic_block(&mut cursor, &mut mode)
        .then(|| tokenizer.first().text_between(&cursor).to_owned())
}

#[test]
fn test_attribute_blocks() {
    assert_eq!(skip_attributes("(* keep *)"), Some("(* keep *)".to_owned()));
    assert_eq!(
        skip_attributes("(* full_case, parallel_case *) x"),
        Some("(* full_case, parallel_case *)".to_owned())
    );
    assert_eq!(
        skip_attributes("(*mark_debug = \"true\"*)"),
        Some("(*mark_debug = \"true\"*)".to_owned())
    );
    assert_eq!(
        skip_attributes("(* weight = (1 + 2), keep *)"),
        Some("(* weight = (1 + 2), keep *)".to_owned())
    );
}

#[test]
fn test_non_attributes() {
    assert_eq!(skip_attributes("(*)"), None);
    assert_eq!(skip_attributes("(*x)"), None);
    assert_eq!(skip_attributes("(* x = 1 ) *)"), None);
    assert_eq!(skip_attributes("(* *)"), None);
    assert_eq!(skip_attributes("(* keep"), None);
    assert_eq!(skip_attributes("( * keep *)"), None);
}

#[test]
fn test_generic_skip_does_not_capture_non_attribute() {
    let sv = SystemVerilog::new();
    let tokenizer = Tokenizer::new("(*x) y");
    let mut cursor = tokenizer.first();
    let mut mode = ParseMode::IterateOnly;

    sv.generic_skip(&mut cursor, &mut mode);

    assert_eq!(tokenizer.first().text_between(&cursor), "(*x)");
}

#[test]
fn test_attributes_are_highlighted_as_metadata() {
    let sv = SystemVerilog::new();
    let tokenizer = Tokenizer::new("(* keep *) wire w;");

    sv.syntax_highlight(&tokenizer);

    assert_eq!(
        syntax_runs(&tokenizer),
        vec![
            (SyntaxRole::Metadata, "(* keep *)".to_owned()),
            (SyntaxRole::Keyword, "wire".to_owned()),
        ]
    );
}

#[test]
fn test_attributes_on_ports_are_modifiers() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype("module m ((* keep *) input a);", Some("Module"));

    assert_eq!(
        prototype_runs(prototype.tokenizer()),
        vec![
            run(PrototypeRole::StartOfParams, "("),
            run(PrototypeRole::OpeningParamModifier, "(*"),
            run(PrototypeRole::ParamModifier, "keep"),
            run(PrototypeRole::ClosingParamModifier, "*)"),
            run(PrototypeRole::ParamModifier, "input"),
            run(PrototypeRole::Name, "a"),
            run(PrototypeRole::EndOfParams, ")"),
        ]
    );
}
