use std::path::{Path, PathBuf};

/// Well-known install locations, Google Chrome first
const KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

/// Binary names tried on PATH when no known location exists
const PATH_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Locate a Chromium-family browser binary.
///
/// Returns `None` when nothing is found, in which case Playwright falls back
/// to the browser it manages itself.
pub fn find_browser_executable() -> Option<PathBuf> {
    find_in(KNOWN_PATHS.iter().map(Path::new)).or_else(find_on_path)
}

fn find_in<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

fn find_on_path() -> Option<PathBuf> {
    PATH_NAMES.iter().find_map(|name| which::which(name).ok())
}
