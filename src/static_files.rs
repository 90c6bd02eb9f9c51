//! Static file serving
//!
//! `/` maps to `index.html`. Request paths are percent-decoded, joined to the
//! root and normalised; anything that ends up outside the root is forbidden,
//! anything unreadable is not found.

use crate::web::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub const INDEX_PATH: &str = "/index.html";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, PartialEq, Eq)]
pub enum StaticError {
    Forbidden,
    NotFound,
}

/// Lexically resolve `.` and `..` without touching the filesystem.
///
/// Leading `..` of a relative path are kept; `..` at the filesystem root is
/// dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(Component::ParentDir.as_os_str());
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Map a request path onto a file below `root`
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, StaticError> {
    let request_path = if request_path == "/" {
        INDEX_PATH
    } else {
        request_path
    };
    let decoded = urlencoding::decode(request_path).map_err(|_| StaticError::NotFound)?;

    let root = normalize(root);
    let resolved = normalize(&root.join(decoded.trim_start_matches('/')));
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(StaticError::Forbidden)
    }
}

#[must_use]
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

pub async fn serve_file(State(state): State<AppState>, uri: Uri) -> Response {
    let path = match resolve(&state.root, uri.path()) {
        Ok(path) => path,
        Err(StaticError::Forbidden) => {
            debug!("Rejected path outside root: {}", uri.path());
            return (StatusCode::FORBIDDEN, "Forbidden").into_response();
        }
        Err(StaticError::NotFound) => return (StatusCode::NOT_FOUND, "Not found").into_response(),
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_root_maps_to_index() {
        let path = resolve(Path::new("/srv/site"), "/").unwrap();
        assert_eq!(path, PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn test_nested_path_and_decoding() {
        let path = resolve(Path::new("/srv/site"), "/img/my%20logo.png").unwrap();
        assert_eq!(path, PathBuf::from("/srv/site/img/my logo.png"));
    }

    #[rstest]
    #[case("/../etc/passwd")]
    #[case("/%2e%2e/%2e%2e/etc/passwd")]
    #[case("/css/../../secret.txt")]
    fn test_escaping_root_is_forbidden(#[case] request: &str) {
        assert_eq!(
            resolve(Path::new("/srv/site"), request),
            Err(StaticError::Forbidden)
        );
    }

    #[test]
    fn test_sibling_directory_with_common_prefix_is_forbidden() {
        assert_eq!(
            resolve(Path::new("/srv/site"), "/../site2/index.html"),
            Err(StaticError::Forbidden)
        );
    }

    #[test]
    fn test_relative_root_above_working_dir() {
        let path = resolve(Path::new("../public"), "/index.html").unwrap();
        assert_eq!(path, PathBuf::from("../public/index.html"));

        let path = resolve(Path::new("../../site/./www"), "/css/app.css").unwrap();
        assert_eq!(path, PathBuf::from("../../site/www/css/app.css"));
    }

    #[rstest]
    #[case("../public", "/../index.html")]
    #[case("../public", "/../../index.html")]
    #[case("public", "/../../public/index.html")]
    fn test_relative_root_escape_is_forbidden(#[case] root: &str, #[case] request: &str) {
        assert_eq!(
            resolve(Path::new(root), request),
            Err(StaticError::Forbidden)
        );
    }

    #[test]
    fn test_dot_segments_inside_root_are_fine() {
        let path = resolve(Path::new("./public"), "/css/../app.js").unwrap();
        assert_eq!(path, PathBuf::from("public/app.js"));
    }

    #[rstest]
    #[case("index.html", "text/html; charset=utf-8")]
    #[case("app.JS", "application/javascript; charset=utf-8")]
    #[case("style.css", "text/css; charset=utf-8")]
    #[case("data.json", "application/json; charset=utf-8")]
    #[case("a.png", "image/png")]
    #[case("a.jpeg", "image/jpeg")]
    #[case("a.jpg", "image/jpeg")]
    #[case("icon.svg", "image/svg+xml")]
    #[case("font.woff2", "application/octet-stream")]
    #[case("README", "application/octet-stream")]
    fn test_content_type(#[case] file: &str, #[case] expected: &str) {
        assert_eq!(content_type(Path::new(file)), expected);
    }
}
