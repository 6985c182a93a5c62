use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
}

impl Level {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// Where the problem is, usually a file path.
    pub location: Option<String>,
    pub message: String,
}

impl DiagnosticMessage {
    pub fn new(message: String) -> Self {
        Self {
            location: None,
            message,
        }
    }

    pub fn with_location(location: String, message: String) -> Self {
        Self {
            location: Some(location),
            message,
        }
    }
}

impl From<String> for DiagnosticMessage {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for DiagnosticMessage {
    fn from(message: &str) -> Self {
        Self::new(message.to_owned())
    }
}

impl Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, &self.message),
            None => write!(f, "{}", &self.message),
        }
    }
}

#[derive(Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: DiagnosticMessage,
    pub source: Option<Box<dyn Error + 'static>>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref()
    }
}

#[must_use = "DiagnosticBuilder is useless unless emitted"]
pub struct DiagnosticBuilder<'a, 'emt> {
    owner: &'a mut Diagnostics<'emt>,
    level: Level,
    message: Option<DiagnosticMessage>,
    location: Option<String>,
    source: Option<Box<dyn Error + 'static>>,
}

impl<'a, 'emt> DiagnosticBuilder<'a, 'emt> {
    fn new(owner: &'a mut Diagnostics<'emt>, level: Level) -> Self {
        Self {
            owner,
            level,
            message: None,
            location: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<DiagnosticMessage>) -> Self {
        let message = message.into();

        self.location = self.location.or_else(|| message.location.clone());
        self.message = Some(message);

        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());

        self
    }

    pub fn with_source(mut self, source: Box<dyn Error + 'static>) -> Self {
        self.source = Some(source);

        self
    }

    /// Emits the diagnostic.
    ///
    /// Without a message, the source error's message is used instead.
    pub fn emit(self) {
        let message = match (self.message, &self.source) {
            (Some(message), _) => message.message,
            (None, Some(source)) => source.to_string(),
            (None, None) => "unknown error".to_owned(),
        };

        let diagnostic = Diagnostic {
            level: self.level,
            message: DiagnosticMessage {
                location: self.location,
                message,
            },
            source: self.source,
        };

        self.owner.emit(diagnostic);
    }
}

type Emitter<'emt> = Box<dyn FnMut(&Diagnostic) + 'emt>;

/// Collects the diagnostics reported while running, forwarding each to an emitter as it comes.
#[derive(Default)]
pub struct Diagnostics<'emt> {
    diagnostics: Vec<Diagnostic>,
    emitter: Option<Emitter<'emt>>,
    has_errors: bool,
}

impl<'emt> Diagnostics<'emt> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets a callback run on every diagnostic when it is emitted.
    pub fn set_emitter(&mut self, emitter: Emitter<'emt>) {
        self.emitter = Some(emitter);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn with_level(&mut self, level: Level) -> DiagnosticBuilder<'_, 'emt> {
        DiagnosticBuilder::new(self, level)
    }

    pub fn fatal(&mut self) -> DiagnosticBuilder<'_, 'emt> {
        self.with_level(Level::Fatal)
    }

    pub fn error(&mut self) -> DiagnosticBuilder<'_, 'emt> {
        self.with_level(Level::Error)
    }

    pub fn warn(&mut self) -> DiagnosticBuilder<'_, 'emt> {
        self.with_level(Level::Warn)
    }

    pub fn info(&mut self) -> DiagnosticBuilder<'_, 'emt> {
        self.with_level(Level::Info)
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.has_errors |= diagnostic.level.is_error();

        if let Some(emitter) = self.emitter.as_mut() {
            emitter(&diagnostic);
        }

        self.diagnostics.push(diagnostic);
    }
}
