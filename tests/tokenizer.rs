use pretty_assertions::assert_eq;

use doctopic::tokenize::{FundamentalType, PrototypeRole, Tokenizer};

fn kinds_and_texts(tokenizer: &Tokenizer) -> Vec<(FundamentalType, &str)> {
    tokenizer
        .tokens()
        .iter()
        .enumerate()
        .map(|(index, token)| (token.ty, tokenizer.token_text(index)))
        .collect()
}

#[test]
fn test_tokens_cover_text() {
    use FundamentalType::*;

    let tokenizer = Tokenizer::new("int x = 42;\n");

    assert_eq!(
        kinds_and_texts(&tokenizer),
        vec![
            (Text, "int"),
            (Whitespace, " "),
            (Text, "x"),
            (Whitespace, " "),
            (Symbol, "="),
            (Whitespace, " "),
            (Text, "42"),
            (Symbol, ";"),
            (LineBreak, "\n"),
        ]
    );

    let joined: String = (0..tokenizer.len())
        .map(|index| tokenizer.token_text(index))
        .collect();
    assert_eq!(joined, tokenizer.text());
}

#[test]
fn test_digit_runs_stop_at_letters() {
    use FundamentalType::*;

    let tokenizer = Tokenizer::new("1_000e10 ab12");

    assert_eq!(
        kinds_and_texts(&tokenizer),
        vec![
            (Text, "1_000"),
            (Text, "e10"),
            (Whitespace, " "),
            (Text, "ab12"),
        ]
    );
}

#[test]
fn test_line_breaks() {
    let tokenizer = Tokenizer::new("a\r\nb\rc\nd");
    let lines: Vec<usize> = tokenizer.tokens().iter().map(|token| token.line()).collect();

    assert_eq!(lines, vec![1, 1, 2, 2, 3, 3, 4]);
    assert_eq!(tokenizer.token_text(1), "\r\n");
}

#[test]
fn test_tabs_expand_to_tab_width() {
    let tokenizer = Tokenizer::new("\tx");
    assert_eq!(tokenizer.cursor_at(1).char_number(), 4);

    let tokenizer = Tokenizer::with_tab_width("a\tb", 8);
    assert_eq!(tokenizer.cursor_at(2).char_number(), 9);
    assert_eq!(tokenizer.end().char_number(), 10);
}

#[test]
fn test_empty_text() {
    let tokenizer = Tokenizer::new("");

    assert!(tokenizer.is_empty());
    assert!(tokenizer.first().at_end());
    assert_eq!(tokenizer.first(), tokenizer.end());
}

#[test]
fn test_cursor_movement_stops_at_bounds() {
    let tokenizer = Tokenizer::new("a b");
    let mut cursor = tokenizer.first();

    assert!(!cursor.previous());
    assert!(cursor.next());
    assert!(cursor.next());
    assert!(cursor.next());
    assert!(cursor.at_end());
    assert!(!cursor.next());

    cursor = tokenizer.first();
    cursor.advance(10);
    assert_eq!(cursor, tokenizer.end());
}

#[test]
fn test_matches_text_spans_tokens() {
    let tokenizer = Tokenizer::new("(* keep *)");
    let mut cursor = tokenizer.first();

    assert!(cursor.matches_text("(*"));
    assert!(!cursor.matches_token("(*"));
    assert!(cursor.try_skip_text("(*"));
    assert_eq!(cursor.index(), 2);
}

#[test]
fn test_matches_text_ends_on_token_boundary() {
    let tokenizer = Tokenizer::new("modules");
    let cursor = tokenizer.first();

    assert!(!cursor.matches_text("module"));
    assert!(cursor.matches_text("modules"));
    assert!(cursor.matches_text_ignore_case("MODULES"));
    assert!(!cursor.matches_text(""));
}

#[test]
fn test_advance_by_chars() {
    let tokenizer = Tokenizer::new("ab cd");
    let mut cursor = tokenizer.first();

    cursor.advance_by_chars(3);

    assert_eq!(cursor.text(), "cd");
}

#[test]
#[should_panic]
fn test_advance_by_chars_inside_token_panics() {
    let tokenizer = Tokenizer::new("abcd");
    let mut cursor = tokenizer.first();

    cursor.advance_by_chars(2);
}

#[test]
fn test_previous_significant_skips_whitespace() {
    let tokenizer = Tokenizer::new("x \n -");
    let minus = tokenizer.cursor_at(4);

    assert_eq!(minus.text(), "-");
    assert_eq!(minus.previous_significant().map(|cursor| cursor.text()), Some("x"));
    assert_eq!(tokenizer.first().previous_significant(), None);
}

#[test]
fn test_trimmed_and_text_between() {
    let tokenizer = Tokenizer::new("  int a  ");
    let (start, end) = tokenizer.first().trimmed(&tokenizer.end());

    assert_eq!(start.text_between(&end), "int a");
    assert_eq!(start.chars_between(&end), 5);

    let (start, end) = tokenizer.first().trimmed(&tokenizer.cursor_at(1));
    assert_eq!(start, end);
}

#[test]
fn test_tags_set_and_reset_in_range() {
    let tokenizer = Tokenizer::new("a b c");
    let start = tokenizer.first();
    let end = tokenizer.cursor_at(3);

    start.set_prototype_role_between(&end, PrototypeRole::Type);
    assert_eq!(
        tokenizer.prototype_roles(),
        vec![
            PrototypeRole::Type,
            PrototypeRole::Type,
            PrototypeRole::Type,
            PrototypeRole::Null,
            PrototypeRole::Null,
        ]
    );

    end.reset_prototype_roles_between(&tokenizer.cursor_at(1));
    assert_eq!(
        tokenizer.prototype_roles(),
        vec![
            PrototypeRole::Type,
            PrototypeRole::Null,
            PrototypeRole::Null,
            PrototypeRole::Null,
            PrototypeRole::Null,
        ]
    );
}

#[test]
fn test_cursors_of_different_tokenizers_are_unordered() {
    let first = Tokenizer::new("a");
    let second = Tokenizer::new("a");

    assert_ne!(first.first(), second.first());
    assert_eq!(first.first().partial_cmp(&second.first()), None);
}

#[test]
fn test_advance_by_chars_to_end() {
    let tokenizer = Tokenizer::new("ab cd");
    let mut cursor = tokenizer.cursor_at(2);

    cursor.advance_by_chars(2);

    assert!(cursor.at_end());
}

#[test]
#[should_panic]
fn test_advance_by_chars_past_end_panics() {
    let tokenizer = Tokenizer::new("ab cd");
    let mut cursor = tokenizer.cursor_at(2);

    cursor.advance_by_chars(3);
}
