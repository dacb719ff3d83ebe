//! Cookie names from `Cookie:` and `Set-Cookie:` header lines.

use crate::capture::{header_lines, CaptureDocument};
use crate::names::NameSet;

/// Set-Cookie attribute keywords; never reported as cookie names.
const COOKIE_ATTRIBUTES: &[&str] = &[
    "path", "domain", "expires", "max-age", "secure", "httponly", "samesite",
];

/// Collects cookie names from request and response headers of every item.
pub fn extract_cookies(doc: &CaptureDocument) -> NameSet {
    let mut names = NameSet::new();
    for item in doc.items() {
        cookie_names_in(item.request_headers(), &mut names);
        cookie_names_in(item.response_headers(), &mut names);
    }
    names
}

/// Adds the cookie names declared by header lines in `head`.
pub(crate) fn cookie_names_in(head: &str, names: &mut NameSet) {
    for line in header_lines(head) {
        if let Some(value) = strip_header(line, "cookie:") {
            for pair in value.split(';') {
                insert_cookie_name(pair, names);
            }
        } else if let Some(value) = strip_header(line, "set-cookie:") {
            // Only the first pair is the cookie; the rest are attributes.
            let declaration = value.split(';').next().unwrap_or("");
            insert_cookie_name(declaration, names);
        }
    }
}

fn strip_header<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}

fn insert_cookie_name(pair: &str, names: &mut NameSet) {
    let Some((name, _)) = pair.split_once('=') else {
        return;
    };
    let name = name.trim();
    if is_cookie_attribute(name) {
        return;
    }
    names.insert(name);
}

fn is_cookie_attribute(name: &str) -> bool {
    COOKIE_ATTRIBUTES
        .iter()
        .any(|attr| attr.eq_ignore_ascii_case(name))
}
