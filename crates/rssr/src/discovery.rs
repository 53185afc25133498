// File: src/discovery.rs
// Purpose: List route modules on disk and compare them with the registered table

use anyhow::{Context, Result};
use rssr_router::{parse_file_path, Router};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Module files that declare submodules rather than pages
const MODULE_DECLARATION_STEM: &str = "mod";

/// Route files under `dir`, relative to it, `/`-separated and sorted
///
/// Only files whose extension is listed in `extensions` are returned;
/// `mod.rs`-style declaration files are skipped.
pub fn scan_routes(dir: impl AsRef<Path>, extensions: &[String]) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        anyhow::bail!("routes directory not found: {:?}", dir);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter() {
        let entry = entry.with_context(|| format!("Failed to scan routes in {:?}", dir))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        let ext_matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| extensions.iter().any(|e| e == ext));
        if !ext_matches {
            continue;
        }
        if path.file_stem().and_then(|s| s.to_str()) == Some(MODULE_DECLARATION_STEM) {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

/// Discovered files whose pattern has no registered route
pub fn unregistered<T>(files: &[String], router: &Router<T>) -> Vec<String> {
    let registered: HashSet<&str> = router.routes().iter().map(|r| r.pattern.as_str()).collect();

    files
        .iter()
        .filter(|file| !registered.contains(parse_file_path(file, "").as_str()))
        .cloned()
        .collect()
}
