//! Core of basemark: decides which source files are "base files".
//!
//! A base file imports only external packages (or nothing at all). This crate
//! provides:
//! - Heuristic import extraction for Python and JavaScript-family sources
//! - Locality classification of each import (project file vs. external package)
//! - Candidate file collection under one or more roots
//! - Settings loading and the decoration a renderer shows for base files

mod analysis;
mod collector;
mod config;
mod constants;
mod decoration;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use analysis::{analyze_file, classify_source, is_base_source};
pub use collector::{CollectorConfig, collect_files};
pub use config::{Settings, find_git_root, find_git_root_from, load_settings};
pub use constants::{
    DEFAULT_EXTENSIONS, EXCLUDED_DIRS, LANGUAGE_PROFILES, SETTINGS_FILE_NAME, profile_for,
    profile_for_extension,
};
pub use decoration::{Decoration, parse_hex_color};
pub use parser::extract;
pub use resolver::{ProbeCache, classify, is_local_js_specifier, is_local_python_module};
pub use types::{Dialect, ImportForm, ImportTarget, LanguageProfile};
