use crate::url::has_extension;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// File name used for pages whose URL does not name a file
const INDEX_FILE: &str = "index.html";

/// Maps an absolute URL onto its location inside the output directory
///
/// # Layout
///
/// | URL path | Local path |
/// |----------|------------|
/// | no extension, or ends in `/` | `output_dir/host/path/index.html` |
/// | anything else | `output_dir/host/parent-of-path/final-segment` |
///
/// Pages and resources share this mapping, so a rewritten link and the file
/// written for its target always agree. The host keeps an explicit
/// non-default port (`127.0.0.1:8080`). Segments are percent-decoded;
/// empty, `.` and `..` segments are dropped and path separators inside a
/// decoded segment become `_`. Query strings and fragments are ignored, so
/// URLs differing only in those collide on disk.
///
/// # Examples
///
/// ```
/// use site_mirror::url::local_path;
/// use std::path::Path;
/// use url::Url;
///
/// let url = Url::parse("http://x/a/b.png").unwrap();
/// assert_eq!(local_path(&url, Path::new("/out")), Path::new("/out/x/a/b.png"));
///
/// let url = Url::parse("http://x/a/").unwrap();
/// assert_eq!(local_path(&url, Path::new("/out")), Path::new("/out/x/a/index.html"));
/// ```
pub fn local_path(url: &Url, output_dir: &Path) -> PathBuf {
    let mut path = output_dir.join(host_dir(url));

    for segment in url.path().split('/') {
        if let Some(name) = file_name_for(segment) {
            path.push(name);
        }
    }

    if !has_extension(url.path()) || url.path().ends_with('/') {
        path.push(INDEX_FILE);
    }

    path
}

/// Strips the output directory from a mapped path and joins the rest with `/`
///
/// Each segment is percent-encoded, so the result is usable as an href.
pub fn relative_to_output(path: &Path, output_dir: &Path) -> String {
    let relative = path.strip_prefix(output_dir).unwrap_or(path);
    join_components(relative.components())
}

/// Href leading from the directory of `from_page` to `target`
///
/// Both paths must come from [`local_path`] with the same output directory.
/// The result always uses `/`, whatever the platform separator is, and each
/// segment is percent-encoded: a file named `a#b.png` is linked as
/// `a%23b.png`.
pub fn relative_href(from_page: &Path, target: &Path) -> String {
    let from_dir: Vec<Component> = from_page
        .parent()
        .map(|dir| dir.components().collect())
        .unwrap_or_default();
    let target: Vec<Component> = target.components().collect();

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - common];
    parts.extend(
        target[common..]
            .iter()
            .map(href_segment),
    );
    parts.join("/")
}

fn host_dir(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn file_name_for(segment: &str) -> Option<String> {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    match decoded.as_str() {
        "" | "." | ".." => None,
        _ => Some(decoded.replace(&['/', '\\'][..], "_")),
    }
}

fn href_segment(component: &Component<'_>) -> String {
    urlencoding::encode(&component.as_os_str().to_string_lossy()).into_owned()
}

fn join_components<'a>(components: impl Iterator<Item = Component<'a>>) -> String {
    components
        .filter(|c| !matches!(c, Component::CurDir | Component::RootDir))
        .map(|c| href_segment(&c))
        .collect::<Vec<_>>()
        .join("/")
}
