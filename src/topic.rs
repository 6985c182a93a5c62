use std::fmt::{self, Display};

use serde::Serialize;

use crate::language::{Element, Language};
use crate::prototype::ParsedPrototype;
use crate::tokenize::Tokenizer;

/// A documentable entity found in source code.
#[derive(Serialize, Debug)]
pub struct Topic {
    title: String,
    comment_type: &'static str,
    language: String,
    symbol: String,
    prototype: Option<ParsedPrototype>,
    line_number: usize,
    embedded: bool,
}

impl Topic {
    pub fn new(
        title: impl Into<String>,
        comment_type: &'static str,
        language: impl Into<String>,
        line_number: usize,
    ) -> Self {
        let title = title.into();

        Self {
            symbol: title.clone(),
            title,
            comment_type,
            language: language.into(),
            prototype: None,
            line_number,
            embedded: false,
        }
    }

    /// Turns a discovered declaration into a topic, parsing its prototype text with the same
    /// language.
    pub fn from_element<L: Language + ?Sized>(
        element: Element,
        language: &L,
        tab_width: usize,
    ) -> Self {
        let comment_type = element.kind.comment_type();
        let symbol = element.symbol();

        let prototype = element.prototype.map(|text| {
            language.parse_tokenized_prototype(
                Tokenizer::with_tab_width(text, tab_width),
                Some(comment_type),
            )
        });

        Self {
            title: element.name,
            comment_type,
            language: language.name().to_owned(),
            symbol,
            prototype,
            line_number: element.line,
            embedded: element.embedded,
        }
    }

    pub fn with_prototype(mut self, prototype: ParsedPrototype) -> Self {
        self.prototype = Some(prototype);

        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comment_type(&self) -> &'static str {
        self.comment_type
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The title qualified with the enclosing scopes, separated by `.`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn prototype(&self) -> Option<&ParsedPrototype> {
        self.prototype.as_ref()
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether the topic was inferred as a member of another topic's body, like an enum value.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn location_description(&self) -> String {
        format!("Language: {}, Line {}", self.language, self.line_number)
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comment_type, self.symbol)
    }
}
