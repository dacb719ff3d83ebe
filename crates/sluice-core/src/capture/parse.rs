//! Streaming walk over the export XML into [`CaptureDocument`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use crate::config::TagNames;
use crate::error::{ExtractError, MalformedInput};

use super::{CaptureDocument, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Url,
    Request,
    Response,
}

impl FieldKind {
    fn from_tag(name: &[u8], tags: &TagNames) -> Option<Self> {
        if name == tags.url.as_bytes() {
            Some(FieldKind::Url)
        } else if name == tags.request.as_bytes() {
            Some(FieldKind::Request)
        } else if name == tags.response.as_bytes() {
            Some(FieldKind::Response)
        } else {
            None
        }
    }

    fn tag<'a>(&self, tags: &'a TagNames) -> &'a str {
        match self {
            FieldKind::Url => &tags.url,
            FieldKind::Request => &tags.request,
            FieldKind::Response => &tags.response,
        }
    }
}

/// Field element currently being collected.
struct OpenField {
    kind: FieldKind,
    /// Stack depth of the field element's content.
    depth: usize,
    base64: bool,
    text: String,
}

/// Loads and parses the capture export at `path`.
///
/// Nothing is written anywhere; a failure here leaves the filesystem untouched.
pub fn load(path: &Path, tags: &TagNames) -> Result<CaptureDocument, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let malformed = |source: MalformedInput| ExtractError::Malformed {
        path: path.to_path_buf(),
        source,
    };
    let text = String::from_utf8(bytes).map_err(|e| malformed(e.into()))?;
    let doc = parse_document(&text, tags).map_err(malformed)?;
    tracing::debug!(items = doc.len(), "loaded capture export {}", path.display());
    Ok(doc)
}

/// Parses export XML held in memory.
///
/// Items are matched by tag name at any depth; their `url`, `request` and
/// `response` children are collected and base64-decoded when marked
/// `base64="true"`. Unknown elements are skipped.
pub fn parse_document(xml: &str, tags: &TagNames) -> Result<CaptureDocument, MalformedInput> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    let mut item_depth: Option<usize> = None;
    let mut current = Item::default();
    let mut field: Option<OpenField> = None;
    let mut items = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if open.is_empty() {
                    check_single_root(saw_root, e.name().as_ref())?;
                }
                saw_root = true;
                let name = e.name().as_ref().to_vec();
                match item_depth {
                    None if name == tags.item.as_bytes() => {
                        item_depth = Some(open.len());
                        current = Item::default();
                    }
                    Some(d) if field.is_none() && open.len() == d + 1 => {
                        if let Some(kind) = FieldKind::from_tag(&name, tags) {
                            field = Some(OpenField {
                                kind,
                                depth: open.len() + 1,
                                base64: is_base64(&e)?,
                                text: String::new(),
                            });
                        }
                    }
                    _ => {}
                }
                open.push(name);
            }
            Event::End(_) => {
                open.pop();
                if field.as_ref().is_some_and(|f| f.depth == open.len() + 1) {
                    if let Some(f) = field.take() {
                        let item_no = items.len() + 1;
                        store_field(&mut current, f, tags, item_no)?;
                    }
                }
                if item_depth == Some(open.len()) {
                    item_depth = None;
                    items.push(std::mem::take(&mut current));
                }
            }
            Event::Empty(e) => {
                if open.is_empty() {
                    check_single_root(saw_root, e.name().as_ref())?;
                }
                saw_root = true;
                if item_depth.is_none() && e.name().as_ref() == tags.item.as_bytes() {
                    items.push(Item::default());
                }
            }
            Event::Text(e) if open.is_empty() => check_blank_outside_root(&e)?,
            Event::CData(e) if open.is_empty() => check_blank_outside_root(&e)?,
            Event::Text(e) => {
                if let Some(f) = field.as_mut().filter(|f| f.depth == open.len()) {
                    f.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(f) = field.as_mut().filter(|f| f.depth == open.len()) {
                    f.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => {
                if let Some(name) = open.last() {
                    return Err(MalformedInput::Truncated(
                        String::from_utf8_lossy(name).into_owned(),
                    ));
                }
                if !saw_root {
                    return Err(MalformedInput::NoRoot);
                }
                break;
            }
            _ => {}
        }
    }

    Ok(CaptureDocument::new(items))
}

/// A second top-level element makes the document ill-formed.
fn check_single_root(saw_root: bool, name: &[u8]) -> Result<(), MalformedInput> {
    if saw_root {
        return Err(MalformedInput::OutsideRoot(format!(
            "second root element <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}

/// Only whitespace may appear before or after the root element.
fn check_blank_outside_root(raw: &[u8]) -> Result<(), MalformedInput> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Ok(());
    }
    let preview: String = text.chars().take(32).collect();
    Err(MalformedInput::OutsideRoot(format!("text {preview:?}")))
}

fn is_base64(start: &BytesStart<'_>) -> Result<bool, MalformedInput> {
    Ok(start
        .try_get_attribute("base64")?
        .is_some_and(|attr| attr.value.as_ref() == b"true"))
}

fn store_field(
    item: &mut Item,
    field: OpenField,
    tags: &TagNames,
    item_no: usize,
) -> Result<(), MalformedInput> {
    let text = if field.base64 {
        decode_base64(&field.text).map_err(|source| MalformedInput::Base64 {
            item: item_no,
            field: field.kind.tag(tags).to_string(),
            source,
        })?
    } else {
        field.text
    };
    match field.kind {
        FieldKind::Url => item.set_url(text.trim().to_string()),
        FieldKind::Request => item.set_request(text),
        FieldKind::Response => item.set_response(text),
    }
    Ok(())
}

/// Decodes standard base64, ignoring embedded whitespace. Bytes that are not
/// UTF-8 (binary bodies) are replaced lossily.
fn decode_base64(text: &str) -> Result<String, base64::DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
