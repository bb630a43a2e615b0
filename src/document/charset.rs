//! Character encoding detection for fetched pages

use encoding_rs::Encoding;

/// How far into a document `<meta>` charset declarations are looked for
const META_SNIFF_LIMIT: usize = 1024;

/// Encoding named by the `charset` parameter of a Content-Type value
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let label = value.trim().trim_matches(|c| c == '"' || c == '\'');
        Encoding::for_label(label.as_bytes())
    })
}

/// Encoding declared by a `<meta>` tag near the start of the document
///
/// Both `<meta charset="...">` and the `http-equiv` form carrying
/// `content="text/html; charset=..."` are recognized.
pub fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(start) = rest.find("<meta") {
        let tag_rest = &rest[start..];
        let end = tag_rest.find('>').unwrap_or(tag_rest.len());
        let tag = &tag_rest[..end];

        if let Some(pos) = tag.find("charset=") {
            let label = tag[pos + "charset=".len()..]
                .trim_start_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
                .split(|c: char| c == '"' || c == '\'' || c == ';' || c == '/' || c.is_whitespace())
                .next()
                .unwrap_or_default();

            if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
                return Some(encoding);
            }
        }

        rest = &tag_rest[end..];
    }

    None
}
