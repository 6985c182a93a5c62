use std::path::Path;
use std::thread;

use pretty_assertions::assert_eq;

use doctopic::language::generic::{GenericLanguage, RUST_SYNTAX};
use doctopic::language::registry::languages;
use doctopic::language::system_verilog::SystemVerilog;
use doctopic::language::{Language, Languages};
use doctopic::tokenize::Tokenizer;
use doctopic::topic::Topic;

#[test]
fn test_lookup_by_name() {
    let registry = languages();

    assert_eq!(registry.get("SystemVerilog").map(|l| l.name()), Some("SystemVerilog"));
    assert_eq!(registry.get("systemverilog").map(|l| l.name()), Some("SystemVerilog"));
    assert_eq!(registry.get("c/C++").map(|l| l.name()), Some("C/C++"));
    assert!(registry.get("Cobol").is_none());
}

#[test]
fn test_lookup_by_extension() {
    let registry = languages();

    assert_eq!(registry.for_extension("SVH").map(|l| l.name()), Some("SystemVerilog"));
    assert_eq!(
        registry.for_path(Path::new("src/top.sv")).map(|l| l.name()),
        Some("SystemVerilog")
    );
    assert_eq!(
        registry.for_path(Path::new("lib.rs")).map(|l| l.name()),
        Some("Rust")
    );
    assert!(registry.for_path(Path::new("Makefile")).is_none());
    assert!(registry.for_path(Path::new("notes.txt")).is_none());
}

#[test]
fn test_later_registration_shadows() {
    let mut registry = Languages::new();
    assert!(registry.is_empty());

    registry.add(SystemVerilog::new(), &["v"]);
    registry.add(GenericLanguage::new("Verilog", &RUST_SYNTAX), &["v"]);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.for_extension("v").map(|l| l.name()), Some("Verilog"));
    assert_eq!(
        registry.iter().map(|l| l.name()).collect::<Vec<_>>(),
        vec!["SystemVerilog", "Verilog"]
    );
}

#[test]
fn test_languages_are_shared_between_threads() {
    let text = "module m (input a);\nendmodule\n";

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let language = languages().get("SystemVerilog").unwrap();

                    language.discover_elements(&Tokenizer::new(text)).len()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(counts, vec![1; 4]);
}

#[test]
fn test_generic_languages_discover_nothing() {
    let rust = languages().get("Rust").unwrap();

    assert!(rust.discover_elements(&Tokenizer::new("fn f() {}")).is_empty());
}

#[test]
fn test_topic_location() {
    let topic = Topic::new("f", "Function", "C/C++", 12);

    assert_eq!(topic.symbol(), "f");
    assert_eq!(topic.location_description(), "Language: C/C++, Line 12");
    assert_eq!(topic.to_string(), "Function f");
    assert!(!topic.is_embedded());
    assert!(topic.prototype().is_none());

    let prototype = languages()
        .get("C/C++")
        .unwrap()
        .parse_prototype("void f(int a)", None);
    let topic = topic.with_prototype(prototype);

    assert_eq!(topic.prototype().map(|p| p.parameter_count()), Some(1));
}
