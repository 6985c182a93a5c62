use std::fmt::{self, Display};

use serde::Serialize;
use tracing::trace;

use crate::tokenize::{Cursor, PrototypeRole, SyntaxRole};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Module,
    Interface,
    Program,
    Package,
    Class,
    Type,
    EnumValue,
    Function,
    Task,
    Parameter,
}

impl ElementKind {
    /// The comment type identifier topics of this kind carry.
    pub fn comment_type(self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::Interface => "Interface",
            Self::Program => "Program",
            Self::Package => "Package",
            Self::Class => "Class",
            Self::Type => "Type",
            Self::EnumValue => "Constant",
            Self::Function => "Function",
            Self::Task => "Task",
            Self::Parameter => "Parameter",
        }
    }

    /// Returns `true` for kinds that open a scope for the declarations in their body.
    pub fn has_body_scope(self) -> bool {
        matches!(
            self,
            Self::Module | Self::Interface | Self::Program | Self::Package | Self::Class
        )
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.comment_type())
    }
}

/// A declaration recorded while matching in [`ParseMode::CreateElements`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    /// The enclosing scopes, outermost first.
    pub scope: Vec<String>,
    /// The declaration text suitable for prototype parsing, if it has one.
    pub prototype: Option<String>,
    pub line: usize,
    pub embedded: bool,
    /// Declared `extern`, so no body follows the header.
    pub external: bool,
}

impl Element {
    /// Returns the name qualified with its scopes, separated by `.`.
    pub fn symbol(&self) -> String {
        self.scope
            .iter()
            .map(String::as_str)
            .chain([self.name.as_str()])
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// The output list and scope stack for [`ParseMode::CreateElements`].
#[derive(Debug, Default)]
pub struct ElementSink {
    elements: Vec<Element>,
    scope: Vec<String>,
}

impl ElementSink {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_scope(&mut self, name: impl Into<String>) {
        self.scope.push(name.into());
    }

    pub fn pop_scope(&mut self) -> Option<String> {
        self.scope.pop()
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Records a declaration spanning `start..end` in the current scope.
    pub fn add(
        &mut self,
        kind: ElementKind,
        name: &str,
        start: &Cursor<'_>,
        end: &Cursor<'_>,
        with_prototype: bool,
    ) {
        let prototype = with_prototype
            .then(|| {
                let (start, end) = start.trimmed(end);

                start.text_between(&end).trim_end_matches(';').trim_end()
            })
            .filter(|text| !text.is_empty())
            .map(str::to_owned);

        let element = Element {
            kind,
            name: name.to_owned(),
            scope: self.scope.clone(),
            prototype,
            line: start.line(),
            embedded: false,
            external: false,
        };

        trace!(element = ?element, "recorded element");

        self.elements.push(element);
    }

    pub fn last_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

/// The position of the element list at the start of a match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Selects which side effect grammar rules perform while matching.
///
/// Rules consult the mode only at the point of tagging, so every rule matches exactly the same
/// input in every mode.
#[derive(Debug)]
pub enum ParseMode<'e> {
    /// Advance only.
    IterateOnly,
    /// Tag prototype roles.
    ParsePrototype,
    /// Tag display roles.
    SyntaxHighlight,
    /// Record declarations into the sink.
    CreateElements(&'e mut ElementSink),
}

impl<'e> ParseMode<'e> {
    pub fn tag_prototype<'t>(&self, start: &Cursor<'t>, end: &Cursor<'t>, role: PrototypeRole) {
        if let Self::ParsePrototype = self {
            start.set_prototype_role_between(end, role);
        }
    }

    pub fn tag_syntax<'t>(&self, start: &Cursor<'t>, end: &Cursor<'t>, role: SyntaxRole) {
        if let Self::SyntaxHighlight = self {
            start.set_syntax_role_between(end, role);
        }
    }

    pub fn elements(&mut self) -> Option<&mut ElementSink> {
        match self {
            Self::CreateElements(sink) => Some(&mut **sink),
            _ => None,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        match self {
            Self::CreateElements(sink) => Checkpoint(sink.elements.len()),
            _ => Checkpoint(0),
        }
    }

    /// Undoes everything a failed attempt did between `start` and `reached`.
    pub fn rollback<'t>(
        &mut self,
        start: &Cursor<'t>,
        reached: &Cursor<'t>,
        checkpoint: Checkpoint,
    ) {
        match self {
            Self::IterateOnly => {}
            Self::ParsePrototype => start.reset_prototype_roles_between(reached),
            Self::SyntaxHighlight => start.reset_syntax_roles_between(reached),
            Self::CreateElements(sink) => sink.elements.truncate(checkpoint.0),
        }
    }
}

/// Runs `rule` on a copy of `cursor`. On success the copy replaces `cursor`; on failure `cursor`
/// stays where it was and every tag and element the rule produced is rolled back.
pub fn attempt<'t, 'e>(
    cursor: &mut Cursor<'t>,
    mode: &mut ParseMode<'e>,
    rule: impl FnOnce(&mut Cursor<'t>, &mut ParseMode<'e>) -> bool,
) -> bool {
    let checkpoint = mode.checkpoint();
    let mut lookahead = *cursor;

    if rule(&mut lookahead, mode) {
        *cursor = lookahead;

        true
    } else {
        trace!(start = ?cursor, reached = ?lookahead, "rolling back failed match");
        mode.rollback(cursor, &lookahead, checkpoint);

        false
    }
}
