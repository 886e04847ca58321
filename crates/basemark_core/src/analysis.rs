use log::{debug, trace};
use std::{fs, path::Path};

use crate::{
    constants::profile_for,
    parser::extract,
    resolver::{ProbeCache, classify},
    types::{ImportTarget, LanguageProfile},
};

/// A source is a base file when none of its imports is local. No imports at all
/// also makes a base file.
pub fn is_base_source(
    content: &str,
    path: &Path,
    profile: &LanguageProfile,
    cache: &ProbeCache,
) -> bool {
    let dir = importer_dir(path);
    extract(content, profile.dialect).iter().all(|target| !classify(target, profile, dir, cache))
}

/// Every import of the source paired with whether it is local
pub fn classify_source(
    content: &str,
    path: &Path,
    profile: &LanguageProfile,
    cache: &ProbeCache,
) -> Vec<(ImportTarget, bool)> {
    let dir = importer_dir(path);
    extract(content, profile.dialect)
        .into_iter()
        .map(|target| {
            let local = classify(&target, profile, dir, cache);
            (target, local)
        })
        .collect()
}

/// Reads and classifies a single file.
///
/// Unreadable files and files without a language profile are never base files.
pub fn analyze_file(path: &Path, cache: &ProbeCache) -> bool {
    let Some(profile) = profile_for(path) else {
        trace!("No language profile for {}", path.display());
        return false;
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Failed to read {}: {}", path.display(), e);
            return false;
        }
    };

    let base = is_base_source(&content, path, profile, cache);
    trace!("{} is {}a base file", path.display(), if base { "" } else { "not " });
    base
}

fn importer_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn analyze(dir: &Path, name: &str, content: &str) -> bool {
        let file = create_test_file(dir, name, content);
        analyze_file(&file, &ProbeCache::new())
    }

    #[test]
    fn test_files_without_imports_are_base() {
        let temp_dir = TempDir::new().unwrap();
        assert!(analyze(temp_dir.path(), "empty.py", ""));
        assert!(analyze(temp_dir.path(), "consts.py", "X = 1\n# import local\n"));
        assert!(analyze(temp_dir.path(), "consts.ts", "export const X = 1;\n"));
    }

    #[test]
    fn test_python_external_only_is_base() {
        let temp_dir = TempDir::new().unwrap();
        let content = "import numpy as np\nimport pandas as pd\nimport json\nfrom datetime import datetime\n";
        assert!(analyze(temp_dir.path(), "base_file.py", content));
    }

    #[test]
    fn test_python_relative_import_is_not_base() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!analyze(temp_dir.path(), "pkg/mod.py", "from .utils import helper\n"));
        assert!(!analyze(temp_dir.path(), "pkg/other.py", "from . import sibling\n"));
    }

    #[test]
    fn test_python_sibling_import_is_not_base() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "base_file.py", "def process_data():\n    pass\n");
        let content = "import numpy as np\nfrom base_file import process_data\n";
        assert!(!analyze(temp_dir.path(), "dependent_file.py", content));
    }

    #[test]
    fn test_python_sibling_in_other_directory_does_not_count() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "lib/helpers.py", "");
        assert!(analyze(temp_dir.path(), "app/main.py", "import helpers\n"));
    }

    #[test]
    fn test_javascript_relative_imports_are_not_base() {
        let temp_dir = TempDir::new().unwrap();
        let content = "import React from 'react';\nimport { DataFetcher } from './base_file';\n";
        assert!(!analyze(temp_dir.path(), "dependent_file.jsx", content));
        assert!(!analyze(temp_dir.path(), "server.js", "const db = require('./db');\n"));
        assert!(!analyze(temp_dir.path(), "up.ts", "import x from '../x';\n"));
    }

    #[test]
    fn test_javascript_packages_only_is_base() {
        let temp_dir = TempDir::new().unwrap();
        let jsx = "import React from 'react';\nimport axios from 'axios';\nimport { useState } from 'react';\n";
        assert!(analyze(temp_dir.path(), "base_file.jsx", jsx));
        let cjs = "const express = require('express');\nconst path = require('path');\n";
        assert!(analyze(temp_dir.path(), "base_file_commonjs.js", cjs));
        assert!(analyze(temp_dir.path(), "scoped.tsx", "import Sub from '@scope/package/sub';\n"));
    }

    #[test]
    fn test_unknown_extension_is_not_base() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!analyze(temp_dir.path(), "script.rb", "puts 'hi'\n"));
    }

    #[test]
    fn test_missing_file_is_not_base() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.py");
        assert!(!analyze_file(&missing, &ProbeCache::new()));
    }

    #[test]
    fn test_non_utf8_file_is_not_base() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("binary.py");
        fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(!analyze_file(&file, &ProbeCache::new()));
    }

    #[test]
    fn test_classify_source_reports_every_import() {
        let profile = crate::constants::profile_for_extension("js").unwrap();
        let content = "import React from 'react';\nconst db = require('./db');\n";
        let results = classify_source(content, Path::new("/p/a.js"), profile, &ProbeCache::new());
        let summary: Vec<(&str, bool)> =
            results.iter().map(|(t, local)| (t.request.as_str(), *local)).collect();
        assert_eq!(summary, [("react", false), ("./db", true)]);
    }
}
