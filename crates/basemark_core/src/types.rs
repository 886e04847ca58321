use serde::Serialize;

/// Import grammar family a file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Python,
    /// `.js`, `.jsx`, `.ts`, `.tsx` and friends
    JavaScript,
}

/// Statement shape an import target was found in. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportForm {
    /// `import a, b as c`
    Import,
    /// `from a import b`
    From,
    /// `import x from 'a'` or `import 'a'`
    EsModule,
    /// `require('a')`
    Require,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportTarget {
    pub request: String,
    pub dialect: Dialect,
    pub form: ImportForm,
}

impl ImportTarget {
    pub fn new(request: impl Into<String>, dialect: Dialect, form: ImportForm) -> Self {
        Self { request: request.into(), dialect, form }
    }
}

/// Static mapping from a file extension to the rules used to analyze it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Extension without the leading dot
    pub extension: &'static str,
    pub dialect: Dialect,
    /// Appended to a module name to build the sibling paths probed on disk.
    /// Empty for dialects that classify lexically.
    pub probe_suffixes: &'static [&'static str],
}
