use std::fmt;
use std::ops::Range;

use itertools::Itertools;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::prototype::layout::{ColumnLayout, ColumnTable, ParameterStyle};
use crate::tokenize::{Cursor, PrototypeRole, Tokenizer};

/// One parenthesized parameter list of a prototype.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParameterSection {
    /// The token tagged [`PrototypeRole::StartOfParams`].
    pub open: usize,
    /// The token tagged [`PrototypeRole::EndOfParams`], if the list was closed.
    pub close: Option<usize>,
    /// Token ranges of the parameters, trimmed of whitespace.
    pub parameters: Vec<Range<usize>>,
}

impl ParameterSection {
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// A declaration's tokens with their prototype and display roles.
pub struct ParsedPrototype {
    tokenizer: Tokenizer,
    style: ParameterStyle,
    sections: Vec<ParameterSection>,
}

fn trimmed_range(tokenizer: &Tokenizer, range: Range<usize>) -> Range<usize> {
    let (start, end) = tokenizer
        .cursor_at(range.start)
        .trimmed(&tokenizer.cursor_at(range.end));

    start.index()..end.index()
}

/// Splits the tagged tokens into parameter sections. Parameter markers nested inside another
/// parameter belong to that parameter and don't start sections of their own.
fn find_sections(tokenizer: &Tokenizer) -> Vec<ParameterSection> {
    let mut sections = Vec::new();
    let mut current: Option<ParameterSection> = None;
    let mut param_start = 0;
    let mut depth = 0usize;

    let mut push_parameter = |section: &mut ParameterSection, range: Range<usize>| {
        let range = trimmed_range(tokenizer, range);

        if !range.is_empty() {
            section.parameters.push(range);
        }
    };

    for index in 0..tokenizer.len() {
        match tokenizer.prototype_role(index) {
            PrototypeRole::StartOfParams => {
                depth += 1;

                if depth == 1 {
                    current = Some(ParameterSection {
                        open: index,
                        close: None,
                        parameters: Vec::new(),
                    });
                    param_start = index + 1;
                }
            }

            PrototypeRole::ParamSeparator if depth == 1 => {
                if let Some(section) = current.as_mut() {
                    push_parameter(section, param_start..index);
                }

                param_start = index + 1;
            }

            PrototypeRole::EndOfParams if depth > 0 => {
                depth -= 1;

                if depth == 0 {
                    if let Some(mut section) = current.take() {
                        push_parameter(&mut section, param_start..index);
                        section.close = Some(index);
                        sections.push(section);
                    }
                }
            }

            _ => {}
        }
    }

    if let Some(mut section) = current.take() {
        push_parameter(&mut section, param_start..tokenizer.len());
        sections.push(section);
    }

    sections
}

impl ParsedPrototype {
    /// Wraps a tokenizer whose prototype roles have been tagged.
    pub fn new(tokenizer: Tokenizer, style: ParameterStyle) -> Self {
        let sections = find_sections(&tokenizer);

        Self {
            tokenizer,
            style,
            sections,
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn text(&self) -> &str {
        self.tokenizer.text()
    }

    pub fn style(&self) -> ParameterStyle {
        self.style
    }

    pub fn sections(&self) -> &[ParameterSection] {
        &self.sections
    }

    pub fn parameter_count(&self) -> usize {
        self.sections.iter().map(ParameterSection::len).sum()
    }

    pub fn parameter_bounds(
        &self,
        section: usize,
        parameter: usize,
    ) -> Option<(Cursor<'_>, Cursor<'_>)> {
        let range = self.sections.get(section)?.parameters.get(parameter)?;

        Some((
            self.tokenizer.cursor_at(range.start),
            self.tokenizer.cursor_at(range.end),
        ))
    }

    pub fn parameter_text(&self, section: usize, parameter: usize) -> Option<&str> {
        let (start, end) = self.parameter_bounds(section, parameter)?;

        Some(start.text_between(&end))
    }

    /// Returns the text of the tokens in each parameter of `section` tagged with `role`.
    pub fn parameter_parts(&self, section: usize, role: PrototypeRole) -> Vec<String> {
        let Some(section) = self.sections.get(section) else {
            return Vec::new();
        };

        section
            .parameters
            .iter()
            .map(|range| {
                range
                    .clone()
                    .filter(|&index| self.tokenizer.prototype_role(index) == role)
                    .map(|index| self.tokenizer.token_text(index))
                    .join(" ")
            })
            .collect()
    }

    pub fn column_table(&self, section: usize) -> Option<ColumnTable<'_>> {
        let section = self.sections.get(section)?;

        Some(ColumnTable::from_parameters(
            self.style,
            section.parameters.iter().map(|range| {
                (
                    self.tokenizer.cursor_at(range.start),
                    self.tokenizer.cursor_at(range.end),
                )
            }),
        ))
    }

    pub fn column_layout(&self, section: usize) -> Option<ColumnLayout> {
        self.column_table(section)
            .map(|table| ColumnLayout::new(&table))
    }
}

impl fmt::Debug for ParsedPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedPrototype")
            .field("text", &self.text())
            .field("style", &self.style)
            .field("sections", &self.sections)
            .finish()
    }
}

impl Serialize for ParsedPrototype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let parameters: Vec<Vec<&str>> = (0..self.sections.len())
            .map(|section| {
                (0..self.sections[section].len())
                    .filter_map(|parameter| self.parameter_text(section, parameter))
                    .collect()
            })
            .collect();

        let mut state = serializer.serialize_struct("ParsedPrototype", 3)?;
        state.serialize_field("text", self.text())?;
        state.serialize_field("style", &self.style)?;
        state.serialize_field("parameters", &parameters)?;
        state.end()
    }
}
