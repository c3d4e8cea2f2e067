//! Translation guards.
//!
//! - every `t!("...")` key referenced under `src/` exists in the fallback
//!   (en-US) bundle
//! - every other locale defines every fallback key
//! - no bundle defines a key twice
//!
//! The parsers are deliberately simple: a message definition is any line of
//! the form `key = ...`; comments, attributes and select variants are skipped.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "adlens-ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn message_keys(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('.'))
        .filter_map(|line| {
            let (left, _) = line.split_once('=')?;
            let key = left.trim();
            let valid = !key.is_empty()
                && key
                    .chars()
                    .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'));
            valid.then(|| key.to_string())
        })
        .collect()
}

fn read_bundle(locale: &str) -> String {
    let path = crate_root().join("i18n").join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {path:?}: {err}"))
}

fn locales() -> Vec<String> {
    let mut found: Vec<String> = fs::read_dir(crate_root().join("i18n"))
        .expect("i18n directory")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    found.sort();
    found
}

/// Literal first arguments of `t!(...)` in every `.rs` file below `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            for entry in fs::read_dir(&path).expect("readable src dir").flatten() {
                stack.push(entry.path());
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let content = fs::read_to_string(&path).expect("readable source file");
        found.extend(keys_in_source(&content));
    }

    found
}

/// `t!("key"` occurrences whose `t` starts a macro name, so `format!("..."`
/// and friends are not mistaken for lookups.
fn keys_in_source(content: &str) -> BTreeSet<String> {
    let needle = "t!(\"";
    let mut found = BTreeSet::new();

    for (pos, _) in content.match_indices(needle) {
        let starts_macro = content[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        if !starts_macro {
            continue;
        }
        let rest = &content[pos + needle.len()..];
        if let Some(end) = rest.find('"') {
            found.insert(rest[..end].to_string());
        }
    }

    found
}

#[test]
fn scanner_ignores_other_macros_ending_in_t() {
    let source = r#"
        let a = t!("nav-dashboard");
        let b = crate::t!("toolbar-rows", count = 3);
        let c = format!("{value:.1}");
        let d = print!("adlens-{}.csv");
        let e = my_t!("not-a-key");
    "#;
    let keys: Vec<String> = keys_in_source(source).into_iter().collect();
    assert_eq!(keys, vec!["nav-dashboard", "toolbar-rows"]);
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback: HashSet<String> = message_keys(&read_bundle(FALLBACK)).into_iter().collect();
    assert!(!fallback.is_empty(), "fallback bundle has no keys");

    let missing: Vec<String> = referenced_keys(&crate_root().join("src"))
        .into_iter()
        .filter(|key| !fallback.contains(key))
        .collect();
    assert!(
        missing.is_empty(),
        "keys used in sources but missing from {FALLBACK}:\n  {}",
        missing.join("\n  ")
    );
}

#[test]
fn every_locale_has_every_fallback_key() {
    let fallback = message_keys(&read_bundle(FALLBACK));
    let all = locales();
    assert!(all.iter().any(|l| l == "pt-BR"), "pt-BR bundle missing");

    let mut failures = Vec::new();
    for locale in all.iter().filter(|l| *l != FALLBACK) {
        let keys: HashSet<String> = message_keys(&read_bundle(locale)).into_iter().collect();
        let missing: Vec<&String> = fallback.iter().filter(|k| !keys.contains(*k)).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing {missing:?}"));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn bundles_have_no_duplicate_keys() {
    for locale in locales() {
        let mut seen = HashSet::new();
        let dups: BTreeSet<String> = message_keys(&read_bundle(&locale))
            .into_iter()
            .filter(|key| !seen.insert(key.clone()))
            .collect();
        assert!(dups.is_empty(), "{locale} defines {dups:?} more than once");
    }
}
