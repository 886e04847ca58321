use log::{debug, info};
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use basemark_core::{Decoration, Settings};

use crate::{scanner::scan, types::Snapshot};

/// Owns the set of base files and answers queries from the last completed refresh.
///
/// `refresh` is the only writer. It builds a fresh [`Snapshot`] and swaps it in, so
/// readers see either the previous set or the new one, never a partial scan.
/// Concurrent refreshes are not cancelled; the last one to finish wins.
pub struct BaseFileIndex {
    roots: Vec<PathBuf>,
    settings: RwLock<Settings>,
    snapshot: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
}

impl BaseFileIndex {
    pub fn new(roots: Vec<PathBuf>, settings: Settings) -> Self {
        Self {
            roots,
            settings: RwLock::new(settings),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Rescans every root and replaces the base file set.
    pub fn refresh(&self) -> Arc<Snapshot> {
        let settings = self.settings();
        debug!("Refreshing base files under {} roots", self.roots.len());

        let mut snapshot = scan(&self.roots, &settings);
        snapshot.generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(snapshot);

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        info!(
            "Refresh #{} complete: {} base files",
            snapshot.generation,
            snapshot.base_files.len()
        );
        snapshot
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_base_file(&self, path: &Path) -> bool {
        let snapshot = self.snapshot();
        if snapshot.base_files.contains(path) {
            return true;
        }
        // Roots are canonical, queries may not be
        path.canonicalize().is_ok_and(|canonical| snapshot.base_files.contains(&canonical))
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Takes effect on the next refresh
    pub fn update_settings(&self, settings: Settings) {
        debug!("Updating settings: {:?}", settings);
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    pub fn decoration_for(&self, path: &Path) -> Option<Decoration> {
        Decoration::for_file(&self.settings(), self.is_base_file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn index_for(temp_dir: &TempDir) -> BaseFileIndex {
        let root = temp_dir.path().canonicalize().unwrap();
        BaseFileIndex::new(vec![root], Settings::default())
    }

    #[test]
    fn test_refresh_classifies_project() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();

        let base_py = create_test_file(&root, "python/base_file.py", "import numpy as np\n");
        let dependent_py = create_test_file(
            &root,
            "python/dependent_file.py",
            "import numpy as np\nfrom base_file import process_data\n",
        );
        let base_js = create_test_file(&root, "js/server.js", "const express = require('express');\n");
        let dependent_js = create_test_file(&root, "js/app.js", "const db = require('./db');\n");
        let vendored = create_test_file(&root, "node_modules/pkg/index.js", "");

        let snapshot = index.refresh();
        assert_eq!(snapshot.files_analyzed, 4);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.refreshed_at.is_some());

        assert!(index.is_base_file(&base_py));
        assert!(index.is_base_file(&base_js));
        assert!(!index.is_base_file(&dependent_py));
        assert!(!index.is_base_file(&dependent_js));
        assert!(!index.is_base_file(&vendored));
    }

    #[test]
    fn test_queries_before_first_refresh_are_false() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let file = create_test_file(&index.roots()[0].clone(), "a.py", "");

        assert!(!index.is_base_file(&file));
        assert_eq!(index.snapshot().generation, 0);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();
        create_test_file(&root, "a.py", "import os\n");
        create_test_file(&root, "b.py", "from .a import x\n");
        create_test_file(&root, "c.ts", "import { a } from 'lodash/fp';\n");

        let first = index.refresh();
        let second = index.refresh();
        assert_eq!(first.base_files, second.base_files);
        assert_eq!(second.generation, first.generation + 1);
    }

    #[test]
    fn test_refresh_replaces_previous_set() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();
        let file = create_test_file(&root, "main.py", "import requests\n");

        index.refresh();
        assert!(index.is_base_file(&file));

        create_test_file(&root, "requests.py", "");
        index.refresh();
        assert!(!index.is_base_file(&file));

        fs::remove_file(&file).unwrap();
        let snapshot = index.refresh();
        assert!(!snapshot.base_files.contains(&file));
    }

    #[test]
    fn test_is_base_file_accepts_non_canonical_path() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();
        create_test_file(&root, "src/a.js", "");

        index.refresh();
        assert!(index.is_base_file(&root.join("src/../src/a.js")));
    }

    #[test]
    fn test_missing_root_yields_empty_set() {
        let temp_dir = TempDir::new().unwrap();
        let index = BaseFileIndex::new(vec![temp_dir.path().join("missing")], Settings::default());
        let snapshot = index.refresh();
        assert!(snapshot.base_files.is_empty());
        assert_eq!(snapshot.files_analyzed, 0);

        let no_roots = BaseFileIndex::new(vec![], Settings::default());
        assert!(no_roots.refresh().base_files.is_empty());
    }

    #[test]
    fn test_settings_update_changes_scanned_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();
        let py = create_test_file(&root, "a.py", "");
        let js = create_test_file(&root, "b.js", "");

        index.update_settings(Settings {
            file_extensions: vec![".py".to_string()],
            ..Settings::default()
        });
        index.refresh();
        assert!(index.is_base_file(&py));
        assert!(!index.is_base_file(&js));
    }

    #[test]
    fn test_decoration_follows_settings() {
        let temp_dir = TempDir::new().unwrap();
        let index = index_for(&temp_dir);
        let root = index.roots()[0].clone();
        let base = create_test_file(&root, "a.py", "");
        let dependent = create_test_file(&root, "b.py", "import a\n");

        index.refresh();
        assert!(index.decoration_for(&base).is_some());
        assert!(index.decoration_for(&dependent).is_none());

        index.update_settings(Settings { enabled: false, ..Settings::default() });
        assert!(index.decoration_for(&base).is_none());
    }
}
