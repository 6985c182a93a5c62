use serde::Serialize;

/// The structural function of a token within a prototype.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrototypeRole {
    #[default]
    Null,

    StartOfParams,
    ParamSeparator,
    EndOfParams,

    /// Direction or storage keywords such as `input` or `const`, applied to the whole parameter.
    ParamModifier,
    OpeningParamModifier,
    ClosingParamModifier,
    TypeQualifier,

    Type,
    TypeModifier,
    OpeningTypeModifier,
    ClosingTypeModifier,

    /// Symbols like `*` and `&` that are written against the name but belong to the type.
    NamePrefixPartOfType,
    Name,
    /// Unpacked dimensions and other suffixes written after the name.
    NameSuffixPartOfType,
    /// The `:` between a name and its type in name-first parameters.
    NameTypeSeparator,

    PropertyValueSeparator,
    PropertyValue,
    DefaultValueSeparator,
    DefaultValue,
}

/// The highlighting category of a token.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyntaxRole {
    #[default]
    Null,
    Keyword,
    Comment,
    String,
    Number,
    /// Attributes, compiler directives and other annotations.
    Metadata,
}
