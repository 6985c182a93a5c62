pub mod generic;
mod grammar;
mod mode;
pub mod registry;
pub mod system_verilog;

use crate::prototype::ParsedPrototype;
use crate::tokenize::Tokenizer;
use crate::topic::Topic;

pub use grammar::{Grammar, Syntax};
pub use mode::{attempt, Checkpoint, Element, ElementKind, ElementSink, ParseMode};
pub use registry::Languages;

/// What the rest of the system can ask of a language.
///
/// Every capability has a default built on the generic grammar, so a language only needs to
/// provide a [`Syntax`] table and override what it understands better.
pub trait Language: Grammar + Send + Sync {
    fn name(&self) -> &str;

    /// Parses a declaration into a prototype. `comment_type` narrows which declaration shape is
    /// tried first.
    fn parse_prototype(&self, text: &str, comment_type: Option<&str>) -> ParsedPrototype {
        self.parse_tokenized_prototype(Tokenizer::new(text), comment_type)
    }

    /// Like [`Language::parse_prototype`], for text that has already been tokenized.
    fn parse_tokenized_prototype(
        &self,
        tokenizer: Tokenizer,
        _comment_type: Option<&str>,
    ) -> ParsedPrototype {
        generic::parse_prototype(self, tokenizer)
    }

    /// Finds the documentable declarations in a source file.
    fn discover_elements(&self, _source: &Tokenizer) -> Vec<Topic> {
        Vec::new()
    }

    /// Tags the display roles of `source` in place.
    fn syntax_highlight(&self, source: &Tokenizer) {
        generic::syntax_highlight(self, source);
    }

    fn is_built_in_type(&self, name: &str) -> bool {
        self.syntax().is_built_in_type(name)
    }
}
