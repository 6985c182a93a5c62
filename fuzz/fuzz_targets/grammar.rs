#![no_main]

use libfuzzer_sys::fuzz_target;

use doctopic::language::registry::languages;
use doctopic::render::{render_highlighted, render_prototype};
use doctopic::source::{Source, SourceBuffer};
use doctopic::tokenize::Tokenizer;

fuzz_target!(|code: &[u8]| {
    let Ok(text) = std::str::from_utf8(code) else { return };

    let mut source_buf = SourceBuffer::new();
    let mut source = Source::new(&mut source_buf);
    let source_id = source.load_from_string("fuzz-input".into(), text.to_owned());
    let source_file = source.get(source_id).unwrap();

    for language in languages().iter() {
        let prototype = language.parse_prototype(source_file.text(), None);
        render_prototype(&prototype, false);

        let tokenizer = Tokenizer::new(source_file.text());
        language.syntax_highlight(&tokenizer);
        assert_eq!(render_highlighted(&tokenizer, false), source_file.text());

        for topic in language.discover_elements(&tokenizer) {
            if let Some(prototype) = topic.prototype() {
                render_prototype(prototype, false);
            }
        }
    }
});
