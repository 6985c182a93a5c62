mod layout;
mod parsed;

pub use layout::{Column, ColumnLayout, ColumnTable, LayoutError, ParameterStyle};
pub use parsed::{ParameterSection, ParsedPrototype};
