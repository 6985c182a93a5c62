//! Lookup of languages by name and by file extension.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::language::generic::{
    GenericLanguage, C_FAMILY_SYNTAX, C_SHARP_SYNTAX, JAVA_SCRIPT_SYNTAX, JAVA_SYNTAX,
    PASCAL_SYNTAX, PYTHON_SYNTAX, RUST_SYNTAX,
};
use crate::language::system_verilog::SystemVerilog;
use crate::language::Language;

/// A set of languages addressable by name (case-insensitively) and by file extension.
#[derive(Default)]
pub struct Languages {
    languages: Vec<Box<dyn Language>>,
    by_name: IndexMap<String, usize>,
    by_extension: IndexMap<String, usize>,
}

impl Languages {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `language` for the given extensions (without the leading dot). A later
    /// registration of the same name or extension shadows the earlier one.
    pub fn add(&mut self, language: impl Language + 'static, extensions: &[&str]) {
        let idx = self.languages.len();

        self.by_name
            .insert(language.name().to_ascii_lowercase(), idx);

        for extension in extensions {
            self.by_extension
                .insert(extension.to_ascii_lowercase(), idx);
        }

        self.languages.push(Box::new(language));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Language> {
        self.by_name
            .get(name.to_ascii_lowercase().as_str())
            .map(|&idx| &*self.languages[idx])
    }

    pub fn for_extension(&self, extension: &str) -> Option<&dyn Language> {
        self.by_extension
            .get(extension.to_ascii_lowercase().as_str())
            .map(|&idx| &*self.languages[idx])
    }

    pub fn for_path(&self, path: &Path) -> Option<&dyn Language> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| self.for_extension(extension))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Language> {
        self.languages.iter().map(|language| &**language)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl fmt::Debug for Languages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Languages")
            .field("names", &self.by_name.keys().collect::<Vec<_>>())
            .field("extensions", &self.by_extension.keys().collect::<Vec<_>>())
            .finish()
    }
}

static DEFAULT: Lazy<Languages> = Lazy::new(|| {
    let mut languages = Languages::new();

    languages.add(SystemVerilog::new(), &["sv", "svh", "v", "vh"]);
    languages.add(
        GenericLanguage::new("C/C++", &C_FAMILY_SYNTAX),
        &["c", "h", "cpp", "hpp", "cc", "cxx"],
    );
    languages.add(GenericLanguage::new("C#", &C_SHARP_SYNTAX), &["cs"]);
    languages.add(GenericLanguage::new("Java", &JAVA_SYNTAX), &["java"]);
    languages.add(GenericLanguage::new("JavaScript", &JAVA_SCRIPT_SYNTAX), &["js"]);
    languages.add(GenericLanguage::new("TypeScript", &JAVA_SCRIPT_SYNTAX), &["ts"]);
    languages.add(GenericLanguage::new("Python", &PYTHON_SYNTAX), &["py"]);
    languages.add(GenericLanguage::new("Rust", &RUST_SYNTAX), &["rs"]);
    languages.add(GenericLanguage::new("Pascal", &PASCAL_SYNTAX), &["pas", "pp"]);

    languages
});

/// The built-in languages.
pub fn languages() -> &'static Languages {
    &DEFAULT
}
