//! Raw HTTP/1.x message helpers: head/body split and header lookup.

/// Splits a raw message at the first blank line into (head, body).
/// Accepts CRLF and bare LF line endings; a message without a blank line is all head.
pub(crate) fn split_message(raw: &str) -> (&str, &str) {
    let crlf = raw.find("\r\n\r\n").map(|i| (i, 4));
    let lf = raw.find("\n\n").map(|i| (i, 2));
    let split = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    match split {
        Some((at, sep)) => (&raw[..at], &raw[at + sep..]),
        None => (raw, ""),
    }
}

/// Lines of a header block with any trailing `\r` removed.
pub(crate) fn header_lines(head: &str) -> impl Iterator<Item = &str> {
    head.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Value of the first header named `name` (case-insensitive), trimmed.
pub(crate) fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    header_lines(head).skip(1).find_map(|line| {
        let (n, v) = line.split_once(':')?;
        n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}

/// Target of a request line such as `GET /a?b=1 HTTP/1.1`.
pub(crate) fn request_target(head: &str) -> Option<&str> {
    let first = header_lines(head).next()?;
    let mut parts = first.split(' ').filter(|p| !p.is_empty());
    let _method = parts.next()?;
    parts.next()
}
