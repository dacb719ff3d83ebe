//! Capture export model: the recorded exchanges of a Burp Suite XML export.
//!
//! A document is loaded once into a flat list of [`Item`]s. Each item keeps the
//! raw request and response messages; header and body views are derived on
//! demand and are empty when the field was absent from the export.

mod message;
mod parse;

pub use parse::{load, parse_document};

pub(crate) use message::{header_lines, header_value};

use message::{request_target, split_message};

/// Parsed capture export. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureDocument {
    items: Vec<Item>,
}

impl CaptureDocument {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One recorded HTTP exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    url: String,
    request: String,
    response: String,
}

impl Item {
    /// Builds an item from the URL and the raw (already decoded) messages.
    pub fn new(
        url: impl Into<String>,
        request: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            request: request.into(),
            response: response.into(),
        }
    }

    /// Request URL; falls back to the request-line target when the export has no URL field.
    pub fn url(&self) -> &str {
        if !self.url.is_empty() {
            return &self.url;
        }
        request_target(self.request_headers()).unwrap_or("")
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// Request line and header lines.
    pub fn request_headers(&self) -> &str {
        split_message(&self.request).0
    }

    pub fn request_body(&self) -> &str {
        split_message(&self.request).1
    }

    /// Status line and header lines.
    pub fn response_headers(&self) -> &str {
        split_message(&self.response).0
    }

    pub fn response_body(&self) -> &str {
        split_message(&self.response).1
    }

    pub fn request_content_type(&self) -> Option<&str> {
        header_value(self.request_headers(), "Content-Type")
    }

    pub fn response_content_type(&self) -> Option<&str> {
        header_value(self.response_headers(), "Content-Type")
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn set_request(&mut self, request: String) {
        self.request = request;
    }

    pub(crate) fn set_response(&mut self, response: String) {
        self.response = response;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_empty() {
        let item = Item::default();
        assert_eq!(item.url(), "");
        assert_eq!(item.request_headers(), "");
        assert_eq!(item.request_body(), "");
        assert_eq!(item.response_headers(), "");
        assert_eq!(item.response_body(), "");
        assert!(item.request_content_type().is_none());
    }

    #[test]
    fn views_split_request_and_response() {
        let item = Item::new(
            "https://x/login",
            "POST /login HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\nu=a&p=b",
            "HTTP/1.1 302 Found\r\nSet-Cookie: sid=1\r\n\r\n",
        );
        assert_eq!(item.url(), "https://x/login");
        assert_eq!(item.request_body(), "u=a&p=b");
        assert_eq!(
            item.request_content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(item.response_headers(), "HTTP/1.1 302 Found\r\nSet-Cookie: sid=1");
        assert_eq!(item.response_body(), "");
    }

    #[test]
    fn url_falls_back_to_request_target() {
        let item = Item::new("", "GET /search?q=1 HTTP/1.1\r\nHost: x\r\n\r\n", "");
        assert_eq!(item.url(), "/search?q=1");
    }
}
