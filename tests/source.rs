use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use doctopic::source::{Source, SourceBuffer};

#[test]
fn test_loaded_files_stay_borrowed() {
    let mut source_buf = SourceBuffer::new();
    let mut source = Source::new(&mut source_buf);

    let first = source.load_from_string(PathBuf::from("a.sv"), "module a;".to_owned());
    let first_text = source.get(first).unwrap().text();

    let second = source.load_from_string(PathBuf::from("b.sv"), "module b;".to_owned());

    assert_ne!(first, second);
    assert_eq!(first_text, "module a;");
    assert_eq!(source.get(second).unwrap().path(), Path::new("b.sv"));
    assert_eq!(source.len(), 2);
    assert_eq!(
        source.iter().map(|file| file.text()).collect::<Vec<_>>(),
        vec!["module a;", "module b;"]
    );
}

#[test]
fn test_missing_file() {
    let mut source_buf = SourceBuffer::new();
    let mut source = Source::new(&mut source_buf);

    assert!(source.load(PathBuf::from("does/not/exist.sv")).is_err());
    assert!(source.is_empty());
}
