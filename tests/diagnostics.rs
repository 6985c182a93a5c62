use std::cell::RefCell;
use std::io;

use pretty_assertions::assert_eq;

use doctopic::errors::{Diagnostic, Diagnostics, Level};

#[test]
fn test_emitted_diagnostics_are_forwarded_and_kept() {
    let seen = RefCell::new(vec![]);

    let mut diagnostics = Diagnostics::new();
    diagnostics.set_emitter(Box::new(|diagnostic: &Diagnostic| {
        seen.borrow_mut().push(diagnostic.to_string())
    }));

    diagnostics
        .warn()
        .with_location("a.sv")
        .with_message("no topics")
        .emit();
    assert!(!diagnostics.has_errors());

    diagnostics.info().with_message("done".to_owned()).emit();
    assert!(!diagnostics.has_errors());

    diagnostics.error().with_message("unknown language").emit();
    assert!(diagnostics.has_errors());

    let levels: Vec<Level> = diagnostics.iter().map(|diagnostic| diagnostic.level).collect();
    assert_eq!(levels, vec![Level::Warn, Level::Info, Level::Error]);

    drop(diagnostics);
    assert_eq!(
        seen.into_inner(),
        vec![
            "a.sv: no topics".to_owned(),
            "done".to_owned(),
            "unknown language".to_owned(),
        ]
    );
}

#[test]
fn test_message_falls_back_to_source() {
    let mut diagnostics = Diagnostics::new();

    diagnostics
        .fatal()
        .with_source(Box::new(io::Error::new(io::ErrorKind::NotFound, "gone")))
        .emit();
    diagnostics.with_level(Level::Warn).emit();

    let diagnostics = diagnostics.into_vec();

    assert_eq!(diagnostics[0].message.message, "gone");
    assert!(diagnostics[0].level.is_error());
    assert!(std::error::Error::source(&diagnostics[0]).is_some());
    assert_eq!(diagnostics[1].message.message, "unknown error");
}
