use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub const PLAN_FILE: &str = "plan.jmx";

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn fixtures_root() -> PathBuf {
    workspace_root().join("fixtures").join("plans")
}

pub fn fixture_dir(name: &str) -> PathBuf {
    fixtures_root().join(name)
}

pub fn fixture_plan(name: &str) -> PathBuf {
    fixture_dir(name).join(PLAN_FILE)
}

/// Fixture directory names, sorted.
pub fn fixture_names() -> Vec<String> {
    let mut names = fs::read_dir(fixtures_root())
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|entry| entry.path().is_dir())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Files under `dir`, as sorted `/`-separated relative paths.
pub fn list_bundle_files(dir: &Path) -> Vec<String> {
    let mut files = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .ok()
                .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}
