use owo_colors::{OwoColorize, Stream};

use doctopic::errors::{Diagnostic, DiagnosticMessage, Level};

fn format_level(level: Level) -> String {
    match level {
        Level::Fatal => format!(
            "{}",
            "FATAL".if_supports_color(Stream::Stderr, |text| text.red())
        ),

        Level::Error => format!(
            "{}",
            "ERROR".if_supports_color(Stream::Stderr, |text| text.bright_red())
        ),

        Level::Warn => format!(
            "{}",
            "WARN ".if_supports_color(Stream::Stderr, |text| text.yellow())
        ),

        Level::Info => format!(
            "{}",
            "INFO ".if_supports_color(Stream::Stderr, |text| text.bright_cyan())
        ),
    }
}

fn format_location(location: Option<&str>) -> String {
    match location {
        None => "".to_owned(),
        Some(location) => format!("{}: ", location),
    }
}

pub fn print_diagnostic(diagnostic: &Diagnostic) {
    let Diagnostic {
        level,
        message: DiagnosticMessage { location, message },
        source,
    } = diagnostic;

    let level = format_level(*level);
    let location = format_location(location.as_deref());

    match source {
        Some(source) => eprintln!("{} {}{}: {}", level, location, message, source),
        None => eprintln!("{} {}{}", level, location, message),
    }
}
