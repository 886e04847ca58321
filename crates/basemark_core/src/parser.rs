use log::trace;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Dialect, ImportForm, ImportTarget};

static PY_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+([a-zA-Z0-9_.,\s]+)").expect("valid regex"));

static PY_FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^from\s+([a-zA-Z0-9_.]+)\s+import").expect("valid regex"));

// Names clause is optional so side-effect imports (`import './polyfill'`) match too.
// Identifier characters are ASCII only.
static ES_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(?:[A-Za-z0-9_\{\},\s*]+\s+from\s+)?['"]([^'"]+)['"]"#).expect("valid regex")
});

static JS_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex")
});

/// Extracts import targets from `content` in the order they appear.
///
/// This is pattern matching, not parsing: anything that does not match one of the
/// recognized statement shapes is silently skipped.
pub fn extract(content: &str, dialect: Dialect) -> Vec<ImportTarget> {
    let targets = match dialect {
        Dialect::Python => extract_python(content),
        Dialect::JavaScript => extract_javascript(content),
    };
    trace!("Extracted {} import targets ({:?})", targets.len(), dialect);
    targets
}

fn extract_python(content: &str) -> Vec<ImportTarget> {
    let mut targets = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(caps) = PY_IMPORT.captures(trimmed) {
            // `import a.b as c, d` -> ["a.b", "d"]
            for entry in caps[1].split(',') {
                let module = entry.trim().split(' ').next().unwrap_or_default();
                if module.is_empty() {
                    continue;
                }
                trace!("Found python import: '{}'", module);
                targets.push(ImportTarget::new(module, Dialect::Python, ImportForm::Import));
            }
        } else if let Some(caps) = PY_FROM_IMPORT.captures(trimmed) {
            trace!("Found python from-import: '{}'", &caps[1]);
            targets.push(ImportTarget::new(&caps[1], Dialect::Python, ImportForm::From));
        }
    }

    targets
}

fn extract_javascript(content: &str) -> Vec<ImportTarget> {
    let es = ES_IMPORT.captures_iter(content).map(|c| (c[1].to_string(), ImportForm::EsModule));
    let cjs = JS_REQUIRE.captures_iter(content).map(|c| (c[1].to_string(), ImportForm::Require));

    es.chain(cjs)
        .map(|(request, form)| {
            trace!("Found {:?} specifier: '{}'", form, request);
            ImportTarget::new(request, Dialect::JavaScript, form)
        })
        .collect()
}
