//! Serves files below the configured web root.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

const INDEX_FILE: &str = "index.html";

/// Maps a request path onto a file below `root`.
///
/// Returns `None` for paths that are not valid UTF-8 once decoded, that try
/// to climb out of `root`, or that do not name a regular file.
pub(crate) fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            _ if segment.contains(['\\', '\0', ':']) => return None,
            _ => path.push(segment),
        }
    }
    if path.is_dir() {
        path.push(INDEX_FILE);
    }
    path.is_file().then_some(path)
}

/// Reads the file for `request_path`, returning its content type and bytes.
pub(crate) fn load(root: &Path, request_path: &str) -> Option<(&'static str, Vec<u8>)> {
    let path = resolve(root, request_path)?;
    let bytes = fs::read(&path).ok()?;
    Some((content_type_for(&path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}
