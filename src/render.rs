//! Plain-text rendering of parsed prototypes, one aligned parameter per line.

use owo_colors::{OwoColorize, Stream};

use crate::prototype::{ColumnTable, ParameterSection, ParsedPrototype};
use crate::tokenize::{PrototypeRole, SyntaxRole, Tokenizer};

const INDENT: &str = "    ";

struct Painter<'t> {
    tokenizer: &'t Tokenizer,
    colored: bool,
}

impl Painter<'_> {
    fn paint(&self, text: &str, role: SyntaxRole) -> String {
        if !self.colored {
            return text.to_owned();
        }

        match role {
            SyntaxRole::Null => text.to_owned(),

            SyntaxRole::Keyword => format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |text| text.blue())
            ),

            SyntaxRole::Comment => format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |text| text.green())
            ),

            SyntaxRole::String => format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |text| text.red())
            ),

            SyntaxRole::Number => format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |text| text.magenta())
            ),

            SyntaxRole::Metadata => format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |text| text.yellow())
            ),
        }
    }

    /// Writes the tokens `start..end`, dropping leading and trailing whitespace and collapsing
    /// the rest to single spaces. Returns the number of visible chars written.
    fn write_collapsed(&self, out: &mut String, start: usize, end: usize) -> usize {
        let mut written = 0;
        let mut pending_space = false;

        for index in start..end {
            let cursor = self.tokenizer.cursor_at(index);

            if cursor.is_whitespace() {
                pending_space = true;

                continue;
            }

            if pending_space && written > 0 {
                out.push(' ');
                written += 1;
            }

            pending_space = false;

            let text = cursor.text();
            out.push_str(&self.paint(text, cursor.syntax_role()));
            written += text.chars().count();
        }

        written
    }

    fn collapsed_width(&self, start: usize, end: usize) -> usize {
        self.write_collapsed(&mut String::new(), start, end)
    }

    /// Returns the separator written after the parameter ending at token `end`, or `,` if there
    /// is none before the list closes.
    fn separator_after(&self, end: usize) -> &str {
        let mut cursor = self.tokenizer.cursor_at(end);
        cursor.skip_whitespace();

        if cursor.prototype_role() == PrototypeRole::ParamSeparator {
            cursor.text()
        } else {
            ","
        }
    }

    /// Writes one line per parameter, each used column padded to the widest cell in it.
    fn write_parameters(
        &self,
        out: &mut String,
        section: &ParameterSection,
        table: &ColumnTable<'_>,
        used: &[usize],
    ) {
        let widths: Vec<usize> = used
            .iter()
            .map(|&column| {
                (0..table.parameter_count())
                    .filter_map(|parameter| table.cell(parameter, column).ok())
                    .map(|(start, end)| self.collapsed_width(start.index(), end.index()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for parameter in 0..table.parameter_count() {
            let mut line = String::new();

            for (position, (&column, &width)) in used.iter().zip(&widths).enumerate() {
                let Ok((start, end)) = table.cell(parameter, column) else {
                    continue;
                };

                let written = self.write_collapsed(&mut line, start.index(), end.index());

                if position + 1 < used.len() {
                    line.extend(std::iter::repeat(' ').take(width.saturating_sub(written) + 1));
                }
            }

            out.push('\n');
            out.push_str(INDENT);
            out.push_str(line.trim_end());

            if parameter + 1 < table.parameter_count() {
                let end = section.parameters[parameter].end;
                out.push_str(self.separator_after(end));
            }
        }

        out.push('\n');
    }
}

/// Renders a prototype for display.
///
/// Without parameters the text is printed on one line with whitespace collapsed. Otherwise each
/// parameter list is broken out one parameter per line with its columns aligned. With `colored`
/// set, display roles are colored when stdout supports it.
pub fn render_prototype(prototype: &ParsedPrototype, colored: bool) -> String {
    let tokenizer = prototype.tokenizer();
    let painter = Painter { tokenizer, colored };
    let (first, last) = tokenizer.first().trimmed(&tokenizer.end());
    let mut out = String::new();
    let mut position = first.index();

    for (index, section) in prototype.sections().iter().enumerate() {
        if section.is_empty() {
            continue;
        }

        let Some(table) = prototype.column_table(index) else {
            continue;
        };

        let Some(layout) = prototype.column_layout(index) else {
            continue;
        };

        let used: Vec<usize> = layout.used_columns().collect();

        painter.write_collapsed(&mut out, position, section.open + 1);
        painter.write_parameters(&mut out, section, &table, &used);
        position = section.close.unwrap_or(tokenizer.len());
    }

    painter.write_collapsed(&mut out, position, last.index().max(position));

    out
}

/// Renders a whole tokenized text verbatim, coloring its display roles when `colored` is set and
/// stdout supports it.
pub fn render_highlighted(tokenizer: &Tokenizer, colored: bool) -> String {
    let painter = Painter { tokenizer, colored };
    let mut out = String::with_capacity(tokenizer.text().len());
    let mut cursor = tokenizer.first();

    while cursor.is_in_bounds() {
        out.push_str(&painter.paint(cursor.text(), cursor.syntax_role()));
        cursor.next();
    }

    out
}
