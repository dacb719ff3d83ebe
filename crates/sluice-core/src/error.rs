//! Error types for loading a capture export and writing name lists.

use std::path::PathBuf;

/// Fatal failure of one extraction run. Every variant names the offending path.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Input file is missing or unreadable.
    #[error("input not found or unreadable: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a well-formed capture export.
    #[error("malformed capture export: {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedInput,
    },

    /// Output file could not be created or written.
    #[error("cannot write output: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why an input document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum MalformedInput {
    #[error("input is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// Document ended before this element was closed.
    #[error("document truncated: <{0}> is never closed")]
    Truncated(String),

    /// Non-whitespace content before or after the single root element.
    #[error("content outside the root element: {0}")]
    OutsideRoot(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("<{field}> of item {item} is not valid base64")]
    Base64 {
        item: usize,
        field: String,
        #[source]
        source: base64::DecodeError,
    },
}

impl From<quick_xml::events::attributes::AttrError> for MalformedInput {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        MalformedInput::Xml(err.into())
    }
}
