use dashmap::DashMap;
use log::trace;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::types::{Dialect, ImportTarget, LanguageProfile};

/// Memoized results of on-disk probes, shared by all files of one scan
pub type ProbeCache = DashMap<PathBuf, bool>;

static PACKAGE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^@?[a-z0-9-]+(?:/[a-z0-9-]+)?(?:/.*)?$").expect("valid regex")
});

/// Returns true when `target` names a file inside the project.
///
/// Python targets are probed against `importer_dir` with the profile's suffixes;
/// JavaScript-family targets are judged from the specifier text alone.
pub fn classify(
    target: &ImportTarget,
    profile: &LanguageProfile,
    importer_dir: &Path,
    cache: &ProbeCache,
) -> bool {
    let local = match target.dialect {
        Dialect::Python => {
            is_local_python_module(&target.request, importer_dir, profile.probe_suffixes, cache)
        }
        Dialect::JavaScript => is_local_js_specifier(&target.request),
    };
    trace!(
        "Classified '{}' as {}",
        target.request,
        if local { "local" } else { "external" }
    );
    local
}

/// A module is local when it is relative (`.x`, `..`) or when a sibling of the
/// importing file exists for one of `suffixes`.
///
/// Dotted names are probed literally: `pkg.sub` looks for `pkg.sub.py`, not
/// `pkg/sub.py`.
pub fn is_local_python_module(
    module: &str,
    importer_dir: &Path,
    suffixes: &[&str],
    cache: &ProbeCache,
) -> bool {
    if module.starts_with('.') {
        return true;
    }

    suffixes.iter().any(|suffix| {
        let candidate = importer_dir.join(format!("{module}{suffix}"));
        probe(&candidate, cache)
    })
}

fn probe(candidate: &Path, cache: &ProbeCache) -> bool {
    if let Some(hit) = cache.get(candidate) {
        trace!("Cache hit for probe: {}", candidate.display());
        return *hit;
    }
    let exists = candidate.exists();
    trace!("Probed {}: {}", candidate.display(), exists);
    cache.insert(candidate.to_path_buf(), exists);
    exists
}

pub fn is_local_js_specifier(spec: &str) -> bool {
    if spec.starts_with("./") || spec.starts_with("../") || spec.starts_with('/') {
        return true;
    }

    // Slash-containing specifiers that don't look like `pkg/sub` or `@scope/pkg/sub`
    // are taken as project sub-paths
    spec.contains('/') && !is_package_specifier(spec)
}

fn is_package_specifier(spec: &str) -> bool {
    if spec.starts_with('.') || spec.starts_with('/') {
        return false;
    }
    PACKAGE_SHAPE.is_match(&package_path(spec))
}

/// `@scope/pkg/sub` -> `@scope/pkg`, `pkg/sub` -> `pkg`
fn package_path(spec: &str) -> String {
    let mut parts = spec.split('/');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) if first.starts_with('@') => format!("{first}/{second}"),
        _ => first.to_string(),
    }
}
