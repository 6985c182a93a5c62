mod common;

use pretty_assertions::assert_eq;

use doctopic::language::system_verilog::SystemVerilog;
use doctopic::language::Language;
use doctopic::prototype::ParameterStyle;
use doctopic::tokenize::{PrototypeRole, SyntaxRole, Tokenizer};
use doctopic::topic::Topic;

use self::common::{parameters, prototype_runs, run, syntax_runs};

fn discover(text: &str) -> Vec<Topic> {
    SystemVerilog::new().discover_elements(&Tokenizer::new(text))
}

fn summary(topics: &[Topic]) -> Vec<(&'static str, &str, usize, bool)> {
    topics
        .iter()
        .map(|topic| {
            (
                topic.comment_type(),
                topic.symbol(),
                topic.line_number(),
                topic.is_embedded(),
            )
        })
        .collect()
}

fn find<'a>(topics: &'a [Topic], symbol: &str) -> &'a Topic {
    topics
        .iter()
        .find(|topic| topic.symbol() == symbol)
        .unwrap_or_else(|| panic!("no topic {}", symbol))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&item| item.to_owned()).collect()
}

#[test]
fn test_discover_design() {
    let topics = discover(include_str!("system_verilog/design.sv"));

    assert_eq!(
        summary(&topics),
        vec![
            ("Package", "bus_pkg", 2, false),
            ("Parameter", "bus_pkg.WIDTH", 3, false),
            ("Type", "bus_pkg.state_t", 5, false),
            ("Constant", "bus_pkg.state_t.IDLE", 6, true),
            ("Constant", "bus_pkg.state_t.BUSY", 7, true),
            ("Constant", "bus_pkg.state_t.DONE", 8, true),
            ("Function", "bus_pkg.clog2", 11, false),
            ("Module", "counter", 16, false),
            ("Parameter", "counter.MAX", 21, false),
            ("Class", "packet", 29, false),
            ("Function", "packet.new", 30, false),
            ("Task", "packet.send", 33, false),
        ]
    );

    assert!(topics.iter().all(|topic| topic.language() == "SystemVerilog"));
    assert_eq!(find(&topics, "bus_pkg.state_t.IDLE").title(), "IDLE");
    assert!(find(&topics, "bus_pkg.state_t.IDLE").prototype().is_none());
}

#[test]
fn test_discovered_prototypes() {
    let topics = discover(include_str!("system_verilog/design.sv"));

    let width = find(&topics, "bus_pkg.WIDTH").prototype().unwrap();
    assert_eq!(width.text(), "parameter int WIDTH = 8");
    assert_eq!(
        prototype_runs(width.tokenizer()),
        vec![
            run(PrototypeRole::ParamModifier, "parameter"),
            run(PrototypeRole::Type, "int"),
            run(PrototypeRole::Name, "WIDTH"),
            run(PrototypeRole::DefaultValueSeparator, "="),
            run(PrototypeRole::DefaultValue, "8"),
        ]
    );

    let clog2 = find(&topics, "bus_pkg.clog2").prototype().unwrap();
    assert_eq!(clog2.text(), "function automatic int clog2(input int value)");
    assert_eq!(parameters(clog2), vec![strings(&["input int value"])]);
    assert_eq!(clog2.parameter_parts(0, PrototypeRole::ParamModifier), strings(&["input"]));
    assert_eq!(clog2.parameter_parts(0, PrototypeRole::Type), strings(&["int"]));

    let counter = find(&topics, "counter").prototype().unwrap();
    assert_eq!(counter.style(), ParameterStyle::C);
    assert_eq!(counter.sections().len(), 2);
    assert_eq!(parameters(counter)[0], strings(&["parameter int W = 8"]));
    assert_eq!(
        counter.parameter_parts(1, PrototypeRole::Name),
        strings(&["clk", "rst_n", "count"])
    );
    assert_eq!(
        counter.parameter_parts(1, PrototypeRole::TypeModifier),
        strings(&["", "", "W - 1 : 0"])
    );

    let packet = find(&topics, "packet").prototype().unwrap();
    assert_eq!(packet.parameter_parts(0, PrototypeRole::Type), strings(&["type"]));
    assert_eq!(packet.parameter_parts(0, PrototypeRole::DefaultValue), strings(&["int"]));

    let new = find(&topics, "packet.new").prototype().unwrap();
    assert_eq!(parameters(new), vec![strings(&["string name = \"packet\""])]);
}

#[test]
fn test_discover_nested_scopes() {
    let topics = discover(include_str!("system_verilog/nested.sv"));

    assert_eq!(
        summary(&topics),
        vec![
            ("Module", "outer", 1, false),
            ("Interface", "outer.bus_if", 2, false),
            ("Type", "outer.later", 5, false),
            ("Type", "outer.beat_t", 6, false),
            ("Program", "test_prog", 12, false),
            ("Module", "top", 15, false),
        ]
    );
}

#[test]
fn test_discover_without_declarations() {
    assert!(discover("").is_empty());
    assert!(discover("assign a = b;\n// module m;\n\"module s;\"").is_empty());
}

#[test]
fn test_unclosed_scope_keeps_nesting() {
    let topics = discover("module a;\nmodule b;\nendmodule\nfunction f;");

    assert_eq!(
        summary(&topics),
        vec![
            ("Module", "a", 1, false),
            ("Module", "a.b", 2, false),
            ("Function", "a.f", 4, false),
        ]
    );
}

#[test]
fn test_implied_types() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype("module m #(W = 8, parameter N) (a, b);", Some("Module"));

    assert_eq!(prototype.parameter_parts(0, PrototypeRole::Name), strings(&["W", "N"]));
    assert_eq!(prototype.parameter_parts(0, PrototypeRole::Type), strings(&["", ""]));
    assert_eq!(prototype.parameter_parts(1, PrototypeRole::Name), strings(&["a", "b"]));
}

#[test]
fn test_port_types() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype(
        "module m (input [7:0] data, output signed [3:0] q, inout wire pkg::bus_t b, ref logic mem [4]);",
        None,
    );

    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::Name),
        strings(&["data", "q", "b", "mem"])
    );
    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::TypeModifier),
        strings(&["7 : 0", "signed 3 : 0", "", ""])
    );
    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::Type),
        strings(&["", "", "wire pkg : : bus_t", "logic"])
    );
    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::NameSuffixPartOfType),
        strings(&["", "", "", "[ 4 ]"])
    );
}

#[test]
fn test_escaped_identifier() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype("module m (input logic \\a+b );", Some("Module"));

    assert_eq!(
        prototype_runs(prototype.tokenizer()),
        vec![
            run(PrototypeRole::StartOfParams, "("),
            run(PrototypeRole::ParamModifier, "input"),
            run(PrototypeRole::Type, "logic"),
            run(PrototypeRole::Name, "\\a+b"),
            run(PrototypeRole::EndOfParams, ")"),
        ]
    );
}

#[test]
fn test_function_headers() {
    let sv = SystemVerilog::new();

    let implied = sv.parse_prototype("function f(a);", Some("Function"));
    assert_eq!(implied.parameter_parts(0, PrototypeRole::Name), strings(&["a"]));

    let scoped = sv.parse_prototype("function int cls::get();", Some("Function"));
    assert_eq!(scoped.sections().len(), 1);
    assert_eq!(scoped.parameter_count(), 0);

    let topics = discover("class c;\n  extern virtual task run(input int n = 1);\nendclass");
    assert_eq!(summary(&topics)[1], ("Task", "c.run", 2, false));
}

#[test]
fn test_unmatched_text_falls_back_to_generic_parameters() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype("foo(a, b)", Some("Function"));

    assert_eq!(prototype.parameter_parts(0, PrototypeRole::Name), strings(&["a", "b"]));
}

#[test]
fn test_highlighting() {
    let sv = SystemVerilog::new();
    let tokenizer = Tokenizer::new("module m; // c\n  assign x = 4'hF; \"s\" endmodule");

    sv.syntax_highlight(&tokenizer);

    assert_eq!(
        syntax_runs(&tokenizer),
        vec![
            (SyntaxRole::Keyword, "module".to_owned()),
            (SyntaxRole::Comment, "// c".to_owned()),
            (SyntaxRole::Keyword, "assign".to_owned()),
            (SyntaxRole::Number, "4'hF".to_owned()),
            (SyntaxRole::String, "\"s\"".to_owned()),
            (SyntaxRole::Keyword, "endmodule".to_owned()),
        ]
    );
}

#[test]
fn test_built_in_types() {
    let sv = SystemVerilog::new();

    assert!(sv.is_built_in_type("logic"));
    assert!(sv.is_built_in_type("wire"));
    assert!(!sv.is_built_in_type("Logic"));
    assert!(!sv.is_built_in_type("state_t"));
}

#[test]
fn test_interface_ports_and_imports() {
    let sv = SystemVerilog::new();
    let prototype = sv.parse_prototype(
        "module m import p::*, q::r; (bus_if.master m_if, input logic [1:0] a = 2'b0);",
        Some("Module"),
    );

    assert_eq!(prototype.sections().len(), 1);
    assert_eq!(prototype.parameter_parts(0, PrototypeRole::Name), strings(&["m_if", "a"]));
    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::Type),
        strings(&["bus_if . master", "logic"])
    );
    assert_eq!(
        prototype.parameter_parts(0, PrototypeRole::DefaultValue),
        strings(&["", "2 ' b0"])
    );
}

#[test]
fn test_discover_class_members_and_extern_headers() {
    let topics = discover(include_str!("system_verilog/members.sv"));

    assert_eq!(
        summary(&topics),
        vec![
            ("Module", "sink", 1, false),
            ("Class", "driver", 3, false),
            ("Function", "driver.run", 6, false),
            ("Task", "driver.drive", 7, false),
            ("Function", "driver.run", 10, false),
            ("Task", "driver.drive", 13, false),
            ("Module", "sink", 16, false),
            ("Module", "top", 20, false),
        ]
    );

    let sink = topics[0].prototype().unwrap();
    assert_eq!(
        sink.text(),
        "extern module sink (input logic clk, input logic [7:0] data)"
    );
    assert_eq!(
        sink.parameter_parts(0, PrototypeRole::Name),
        strings(&["clk", "data"])
    );

    let run = topics[4].prototype().unwrap();
    assert_eq!(run.text(), "function void driver::run(int cycles)");
    assert_eq!(run.parameter_parts(0, PrototypeRole::Name), strings(&["cycles"]));
}

#[test]
fn test_virtual_interface_handle_is_not_a_header() {
    let topics = discover(
        "class drv; virtual interface bus_if vif; function void run(); endfunction endclass \
         module top; endmodule",
    );

    assert_eq!(
        summary(&topics),
        vec![
            ("Class", "drv", 1, false),
            ("Function", "drv.run", 1, false),
            ("Module", "top", 1, false),
        ]
    );
}

#[test]
fn test_extern_module_opens_no_scope() {
    let topics = discover("extern module m(input a); module top; endmodule module other; endmodule");

    assert_eq!(
        summary(&topics),
        vec![
            ("Module", "m", 1, false),
            ("Module", "top", 1, false),
            ("Module", "other", 1, false),
        ]
    );
}

#[test]
fn test_out_of_class_method_is_scoped_under_its_class() {
    let topics = discover("function automatic int pkg::cls::size();\nendfunction");

    assert_eq!(summary(&topics), vec![("Function", "pkg.cls.size", 1, false)]);
    assert_eq!(topics[0].title(), "size");
}
