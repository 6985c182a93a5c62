use insta::assert_snapshot;

use doctopic::language::registry::languages;
use doctopic::language::system_verilog::SystemVerilog;
use doctopic::language::Language;
use doctopic::render::{render_highlighted, render_prototype};
use doctopic::tokenize::Tokenizer;

fn render(language: &str, text: &str, comment_type: Option<&str>) -> String {
    let prototype = languages()
        .get(language)
        .unwrap()
        .parse_prototype(text, comment_type);

    render_prototype(&prototype, false)
}

#[test]
fn test_render_c_function() {
    assert_snapshot!(render("C/C++", "void f(int a, unsigned long b)", None), @r###"
    void f(
        int           a,
        unsigned long b
    )
    "###);
}

#[test]
fn test_render_pointer_and_default_columns() {
    assert_snapshot!(render("C/C++", "int f(const char *name = 0, int **out)", None), @r###"
    int f(
        const char *  name = 0,
              int  ** out
    )
    "###);
}

#[test]
fn test_render_sv_module() {
    let text = "module counter #(parameter int W = 8) (\n  input  logic         clk,\n  \
                input  logic         rst_n,\n  output logic [W-1:0] count\n);";

    assert_snapshot!(render("SystemVerilog", text, Some("Module")), @r###"
    module counter #(
        parameter int W = 8
    ) (
        input  logic         clk,
        input  logic         rst_n,
        output logic [W-1:0] count
    )
    "###);
}

#[test]
fn test_render_pascal_function() {
    let text = "function F(a: Integer; var b: string = 'x'): Boolean";

    assert_snapshot!(render("Pascal", text, None), @r###"
    function F(
            a : Integer;
        var b : string  = 'x'
    ): Boolean
    "###);
}

#[test]
fn test_render_without_parameters() {
    assert_eq!(render("C/C++", "  void   f()  ", None), "void f()");
    assert_eq!(render("C/C++", "int\n  x", None), "int x");
    assert_eq!(render("C/C++", "", None), "");
}

#[test]
fn test_render_highlighted_keeps_text() {
    let text = "module m; // c\n\tassign x = 4'hF;\n";
    let tokenizer = Tokenizer::new(text);

    SystemVerilog::new().syntax_highlight(&tokenizer);

    assert_eq!(render_highlighted(&tokenizer, false), text);
}
