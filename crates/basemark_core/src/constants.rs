//! Language profiles, default scan extensions and excluded directories.
//!
//! Every extension the analyzer understands maps to exactly one [`LanguageProfile`].
//! The configured extension list decides what gets scanned; an extension that is
//! scanned but has no profile here is never reported as a base file.

use std::path::Path;

use crate::types::{Dialect, LanguageProfile};

/// Candidate sibling files for a Python module `name`: `name.py`, `name/__init__.py`
pub const PYTHON_PROBE_SUFFIXES: &[&str] = &[".py", "/__init__.py"];

pub const LANGUAGE_PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        extension: "py",
        dialect: Dialect::Python,
        probe_suffixes: PYTHON_PROBE_SUFFIXES,
    },
    LanguageProfile { extension: "js", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "jsx", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "ts", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "tsx", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "mjs", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "cjs", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "mts", dialect: Dialect::JavaScript, probe_suffixes: &[] },
    LanguageProfile { extension: "cts", dialect: Dialect::JavaScript, probe_suffixes: &[] },
];

/// Extensions scanned when the settings do not say otherwise
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".jsx", ".tsx"];

/// Dependency and tooling directories that are never descended into
pub const EXCLUDED_DIRS: &[&str] =
    &["node_modules", "bower_components", "__pycache__", ".venv", "venv", ".git"];

pub const SETTINGS_FILE_NAME: &str = ".basemark.json";

pub const BASE_FILE_TOOLTIP: &str = "Base file (no local dependencies)";

pub const BASE_FILE_BADGE: char = '●';

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#98FF98";

pub fn profile_for_extension(ext: &str) -> Option<&'static LanguageProfile> {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    LANGUAGE_PROFILES.iter().find(|p| p.extension == ext)
}

pub fn profile_for(path: &Path) -> Option<&'static LanguageProfile> {
    path.extension().and_then(|e| e.to_str()).and_then(profile_for_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions_all_have_profiles() {
        for ext in DEFAULT_EXTENSIONS {
            assert!(profile_for_extension(ext).is_some(), "no profile for '{}'", ext);
        }
    }

    #[test]
    fn test_python_profile_probes_module_and_package() {
        let profile = profile_for(Path::new("/project/app/main.py")).unwrap();
        assert_eq!(profile.dialect, Dialect::Python);
        assert_eq!(profile.probe_suffixes, &[".py", "/__init__.py"]);
    }

    #[test]
    fn test_javascript_family_never_probes() {
        for ext in ["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"] {
            let profile = profile_for_extension(ext).unwrap();
            assert_eq!(profile.dialect, Dialect::JavaScript);
            assert!(profile.probe_suffixes.is_empty());
        }
    }

    #[test]
    fn test_profile_lookup_accepts_leading_dot() {
        assert_eq!(profile_for_extension(".tsx"), profile_for_extension("tsx"));
    }

    #[test]
    fn test_unknown_extension_has_no_profile() {
        assert!(profile_for(Path::new("script.rb")).is_none());
        assert!(profile_for(Path::new("Makefile")).is_none());
    }

    #[test]
    fn test_node_modules_is_excluded() {
        assert!(EXCLUDED_DIRS.contains(&"node_modules"));
    }
}
