use std::error::Error;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::tokenize::{Cursor, PrototypeRole};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ModifierQualifier,
    Type,
    /// Symbols such as `*` and `&` written between the type and the name.
    Symbols,
    Name,
    /// The `:` between the name and type of a name-first parameter.
    TypeAssignment,
    PropertyValueSeparator,
    PropertyValue,
    DefaultValueSeparator,
    DefaultValue,
}

const C_COLUMNS: &[Column] = &[
    Column::ModifierQualifier,
    Column::Type,
    Column::Symbols,
    Column::Name,
    Column::PropertyValueSeparator,
    Column::PropertyValue,
    Column::DefaultValueSeparator,
    Column::DefaultValue,
];

const PASCAL_COLUMNS: &[Column] = &[
    Column::ModifierQualifier,
    Column::Name,
    Column::TypeAssignment,
    Column::Type,
    Column::PropertyValueSeparator,
    Column::PropertyValue,
    Column::DefaultValueSeparator,
    Column::DefaultValue,
];

/// How a family of languages writes parameters.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterStyle {
    /// Type first: `const char *name = 0`.
    #[default]
    C,
    /// Name first: `name: Type = 0`.
    Pascal,
}

impl ParameterStyle {
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::C => C_COLUMNS,
            Self::Pascal => PASCAL_COLUMNS,
        }
    }

    pub fn column_count(self) -> usize {
        self.columns().len()
    }

    /// Returns the index of the column a token with `role` belongs to.
    pub fn column_of(self, role: PrototypeRole) -> Option<usize> {
        use PrototypeRole::*;

        let column = match (self, role) {
            (
                _,
                ParamModifier | OpeningParamModifier | ClosingParamModifier | TypeQualifier,
            ) => Column::ModifierQualifier,

            (_, Type | TypeModifier | OpeningTypeModifier | ClosingTypeModifier) => Column::Type,

            (Self::C, NamePrefixPartOfType) => Column::Symbols,
            (Self::Pascal, NamePrefixPartOfType) => Column::Name,
            (_, Name | NameSuffixPartOfType) => Column::Name,
            (Self::Pascal, NameTypeSeparator) => Column::TypeAssignment,
            (_, PropertyValueSeparator) => Column::PropertyValueSeparator,
            (_, PropertyValue) => Column::PropertyValue,
            (_, DefaultValueSeparator) => Column::DefaultValueSeparator,
            (_, DefaultValue) => Column::DefaultValue,

            _ => return None,
        };

        self.columns().iter().position(|&c| c == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    ColumnOutOfRange { index: usize, count: usize },
    ParameterOutOfRange { index: usize, count: usize },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnOutOfRange { index, count } => write!(
                f,
                "column index {} is out of range for a layout with {} columns",
                index, count
            ),

            Self::ParameterOutOfRange { index, count } => write!(
                f,
                "parameter index {} is out of range for a section with {} parameters",
                index, count
            ),
        }
    }
}

impl Error for LayoutError {}

/// Column boundaries for every parameter of one section: row `i` holds `column_count + 1`
/// cursors, column `c` of parameter `i` spanning `rows[i][c]..rows[i][c + 1]`.
#[derive(Debug, Clone)]
pub struct ColumnTable<'t> {
    style: ParameterStyle,
    rows: Vec<Vec<Cursor<'t>>>,
}

impl<'t> ColumnTable<'t> {
    /// Computes the boundaries of each `start..end` parameter range from its prototype roles.
    ///
    /// Columns only move forward: a token whose column precedes the current one stays in the
    /// current column, and whitespace or tokens with unmapped roles never move the boundary.
    pub fn from_parameters(
        style: ParameterStyle,
        parameters: impl IntoIterator<Item = (Cursor<'t>, Cursor<'t>)>,
    ) -> Self {
        let column_count = style.column_count();

        let rows = parameters
            .into_iter()
            .map(|(start, end)| {
                let mut row = vec![start; column_count + 1];
                let mut current = 0;
                let mut cursor = start;

                while cursor < end {
                    if !cursor.is_whitespace() {
                        match style.column_of(cursor.prototype_role()) {
                            Some(column) if column > current => {
                                row[current + 1..=column].fill(cursor);
                                current = column;
                            }

                            _ => {}
                        }
                    }

                    cursor.next();
                }

                row[current + 1..].fill(end);

                row
            })
            .collect();

        Self { style, rows }
    }

    pub fn style(&self) -> ParameterStyle {
        self.style
    }

    pub fn column_count(&self) -> usize {
        self.style.column_count()
    }

    pub fn parameter_count(&self) -> usize {
        self.rows.len()
    }

    fn check_column(&self, column: usize) -> Result<(), LayoutError> {
        if column < self.column_count() {
            Ok(())
        } else {
            Err(LayoutError::ColumnOutOfRange {
                index: column,
                count: self.column_count(),
            })
        }
    }

    fn row(&self, parameter: usize) -> Result<&[Cursor<'t>], LayoutError> {
        self.rows
            .get(parameter)
            .map(Vec::as_slice)
            .ok_or(LayoutError::ParameterOutOfRange {
                index: parameter,
                count: self.rows.len(),
            })
    }

    /// Returns the column's `start..end` cursors with surrounding whitespace trimmed.
    pub fn cell(
        &self,
        parameter: usize,
        column: usize,
    ) -> Result<(Cursor<'t>, Cursor<'t>), LayoutError> {
        self.check_column(column)?;
        let row = self.row(parameter)?;

        Ok(row[column].trimmed(&row[column + 1]))
    }

    /// Returns the char width of a column, excluding whitespace around it.
    pub fn width(&self, parameter: usize, column: usize) -> Result<usize, LayoutError> {
        self.check_column(column)?;

        Ok(row_width(self.row(parameter)?, column))
    }
}

/// `column` must be less than the row's column count.
fn row_width(row: &[Cursor<'_>], column: usize) -> usize {
    let (start, end) = row[column].trimmed(&row[column + 1]);

    start.chars_between(&end)
}

/// Per-column widths shared by every parameter of a section.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    style: ParameterStyle,
    widths: Vec<usize>,
}

impl ColumnLayout {
    pub fn new(table: &ColumnTable<'_>) -> Self {
        let widths = (0..table.column_count())
            .map(|column| {
                table
                    .rows
                    .iter()
                    .map(|row| row_width(row, column))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        Self {
            style: table.style(),
            widths,
        }
    }

    pub fn style(&self) -> ParameterStyle {
        self.style
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    fn check_column(&self, column: usize) -> Result<(), LayoutError> {
        if column < self.widths.len() {
            Ok(())
        } else {
            Err(LayoutError::ColumnOutOfRange {
                index: column,
                count: self.widths.len(),
            })
        }
    }

    pub fn column(&self, index: usize) -> Result<Column, LayoutError> {
        self.check_column(index)?;

        Ok(self.style.columns()[index])
    }

    pub fn width(&self, column: usize) -> Result<usize, LayoutError> {
        self.check_column(column)?;

        Ok(self.widths[column])
    }

    pub fn is_used(&self, column: usize) -> Result<bool, LayoutError> {
        Ok(self.width(column)? != 0)
    }

    pub fn first_used(&self) -> Option<usize> {
        self.widths.iter().position(|&width| width != 0)
    }

    pub fn last_used(&self) -> Option<usize> {
        self.widths.iter().rposition(|&width| width != 0)
    }

    /// Returns the indices of the used columns, in order.
    pub fn used_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.widths
            .iter()
            .enumerate()
            .filter(|&(_, &width)| width != 0)
            .map(|(index, _)| index)
    }
}
