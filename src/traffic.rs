pub(crate) mod sniff;

use std::fmt::Display;
use bstr::ByteSlice;
use http::HeaderMap;
use serde::{Serialize, Deserialize};

use crate::{gateway::Annotated, palette::ColorLabel};

/// Coarse kind of a response body, as sniffed by the capture side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum MimeKind {
    Json,
    Xml,
    Html,
    PlainText,
    Other
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    match headers.get(name) {
        Some(value) => value.as_bytes().to_str_lossy().to_string(),
        None => String::default()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TrafficRequest {
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>
}

impl TrafficRequest {
    pub(crate) fn new<T: ToString, U: ToString>(method: T, url: U) -> Self {
        TrafficRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: Vec::default()
        }
    }

    /// Empty string when the header is missing
    pub(crate) fn content_type(&self) -> String {
        header_value(&self.headers, "content-type")
    }

    pub(crate) fn get_hostname(&self) -> String {
        self.url
            .split("/")
            .nth(2)
            .unwrap_or_default()
            .to_string()
    }

    pub(crate) fn get_request_path(&self) -> String {
        let path_list = self.url
            .split("/")
            .skip(3)
            .collect::<Vec<&str>>();
        format!("/{}", path_list.join("/"))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TrafficResponse {
    pub(crate) status: u16,
    pub(crate) headers: HeaderMap,
    pub(crate) inferred_kind: MimeKind,
    pub(crate) body: Vec<u8>
}

impl TrafficResponse {
    /// Builds a response and sniffs its kind from the body
    pub(crate) fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        let inferred_kind = sniff::infer_kind(&body);
        TrafficResponse {
            status,
            headers,
            inferred_kind,
            body
        }
    }

    pub(crate) fn content_type(&self) -> String {
        header_value(&self.headers, "content-type")
    }
}

/// One HTTP exchange. The response is missing until the host has received it.
#[derive(Clone, Debug)]
pub(crate) struct TrafficRecord {
    pub(crate) id: usize,
    pub(crate) request: TrafficRequest,
    pub(crate) response: Option<TrafficResponse>,
    annotation: ColorLabel
}

impl TrafficRecord {
    pub(crate) fn new(id: usize, request: TrafficRequest) -> Self {
        TrafficRecord {
            id,
            request,
            response: None,
            annotation: ColorLabel::NONE
        }
    }

    /// Rebuilds a record that was stored with a highlight already set
    pub(crate) fn restore(id: usize, request: TrafficRequest, response: Option<TrafficResponse>, annotation: ColorLabel) -> Self {
        TrafficRecord {
            id,
            request,
            response,
            annotation
        }
    }
}

impl Annotated for TrafficRecord {
    fn annotation(&self) -> ColorLabel {
        self.annotation
    }

    fn annotation_slot(&mut self) -> &mut ColorLabel {
        &mut self.annotation
    }
}

// ---------------------------------------------------------------------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Direction {
    ToServer,
    ToClient
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::ToServer => write!(f, "to-server"),
            Direction::ToClient => write!(f, "to-client")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StreamPayload {
    Text(String),
    Binary(Vec<u8>)
}

impl StreamPayload {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StreamPayload::Text(_) => "text",
            StreamPayload::Binary(_) => "binary"
        }
    }

    /// Short printable excerpt for log lines
    pub(crate) fn preview(&self, max_chars: usize) -> String {
        let lossy = match self {
            StreamPayload::Text(text) => text.clone(),
            StreamPayload::Binary(bytes) => bytes.to_str_lossy().to_string()
        };
        lossy.chars().take(max_chars).collect()
    }
}

/// One frame of a bidirectional message stream. Never persisted.
#[derive(Debug, Clone)]
pub(crate) struct StreamMessage {
    pub(crate) payload: StreamPayload,
    pub(crate) direction: Direction,
    annotation: ColorLabel
}

impl StreamMessage {
    pub(crate) fn new(payload: StreamPayload, direction: Direction) -> Self {
        StreamMessage {
            payload,
            direction,
            annotation: ColorLabel::NONE
        }
    }
}

impl Annotated for StreamMessage {
    fn annotation(&self) -> ColorLabel {
        self.annotation
    }

    fn annotation_slot(&mut self) -> &mut ColorLabel {
        &mut self.annotation
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn missing_content_type_is_empty() {
        let request = TrafficRequest::new("GET", "https://example.com/");
        assert_eq!(request.content_type(), "");

        let response = TrafficResponse::new(200, HeaderMap::new(), vec![]);
        assert_eq!(response.content_type(), "");
    }

    #[test]
    fn content_type_is_read_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_bytes(b"text/plain; charset=\xff").unwrap());
        let response = TrafficResponse::new(200, headers, b"hello".to_vec());
        assert!(response.content_type().starts_with("text/plain; charset="));
        assert_eq!(response.inferred_kind, MimeKind::PlainText);
    }

    #[test]
    fn hostname_and_path() {
        let request = TrafficRequest::new("GET", "https://example.com/a/b?c=d");
        assert_eq!(request.get_hostname(), "example.com");
        assert_eq!(request.get_request_path(), "/a/b?c=d");
    }

    #[test]
    fn new_records_are_unannotated() {
        let record = TrafficRecord::new(0, TrafficRequest::new("GET", "https://example.com/"));
        assert_eq!(record.annotation(), ColorLabel::NONE);
        let message = StreamMessage::new(StreamPayload::Text("hi".to_string()), Direction::ToClient);
        assert_eq!(message.annotation(), ColorLabel::NONE);
    }

    #[test]
    fn payload_preview_is_truncated() {
        let payload = StreamPayload::Binary(b"0123456789".to_vec());
        assert_eq!(payload.kind(), "binary");
        assert_eq!(payload.preview(4), "0123");
        assert_eq!(Direction::ToServer.to_string(), "to-server");
    }
}
